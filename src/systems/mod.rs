pub mod colors;
pub mod counters;
pub mod halo;
pub mod interaction;
pub mod particles;
pub mod resize;
pub mod time;
pub mod typing;
