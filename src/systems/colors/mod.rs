use bevy::prelude::*;
use enum_map::Enum;
use rand::Rng;

pub const BACKDROP_COLOR: Color = Color::srgb(0.016, 0.024, 0.055);

// Particle bodies and their connection lines share one base color; alpha is
// per particle (bodies) or distance-attenuated (connections).
pub const FIELD_COLOR: Color = Color::srgb(0.0, 0.4, 1.0);

pub const ACCENT_COLOR: Color = Color::srgb(0.0, 0.4, 1.0);
pub const HEADLINE_COLOR: Color = Color::srgb(0.92, 0.95, 1.0);

/// The halo renders from a fixed three-hue palette; saturation and
/// lightness vary by part, alpha by the caller.
#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaloHue {
    Azure,
    Mint,
    Violet,
}

impl HaloHue {
    pub fn degrees(self) -> f32 {
        match self {
            HaloHue::Azure => 210.0,
            HaloHue::Mint => 165.0,
            HaloHue::Violet => 260.0,
        }
    }

    pub fn sample(rng: &mut impl Rng) -> Self {
        <HaloHue as Enum>::from_usize(rng.random_range(0..<HaloHue as Enum>::LENGTH))
    }

    pub fn core(self, alpha: f32) -> Color {
        Color::hsla(self.degrees(), 0.85, 0.65, alpha)
    }

    pub fn glow(self) -> Color {
        Color::hsla(self.degrees(), 0.85, 0.65, 0.4)
    }

    pub fn trail(self, alpha: f32) -> Color {
        Color::hsla(self.degrees(), 0.80, 0.65, alpha)
    }

    pub fn ring(self, alpha: f32) -> Color {
        Color::hsla(self.degrees(), 0.80, 0.60, alpha)
    }
}
