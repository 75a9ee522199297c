use bevy::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

pub struct RngPlugin;
impl Plugin for RngPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GlobalRng::default());
    }
}

/// Single source of pseudo-randomness for every effect. Entropy-seeded in
/// the running app; tests construct it with [`GlobalRng::seeded`] instead.
#[derive(Resource)]
pub struct GlobalRng {
    pub uniform: Pcg64Mcg,
}

impl GlobalRng {
    pub fn seeded(seed: u64) -> Self {
        GlobalRng {
            uniform: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl Default for GlobalRng {
    fn default() -> Self {
        GlobalRng {
            uniform: Pcg64Mcg::from_os_rng(),
        }
    }
}
