pub mod rng;
pub mod tuning;
