//! Orbiting halo: a fixed ring of bodies circling a shared center, each
//! dragging a bounded fading trail, plus pulse rings emitted on a fixed
//! frame cadence that expand and fade until removed.

use bevy::{prelude::*, window::PrimaryWindow};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use crate::{
    data::{
        rng::GlobalRng,
        tuning::{HaloTuning, VisualTuning},
    },
    systems::{
        colors::HaloHue,
        resize::SurfaceMetrics,
        time::{FrameCounter, VisualsSystems},
    },
};


const HALO_Z: f32 = 1.0;
const TRAIL_Z: f32 = 0.0;
const GLOW_Z: f32 = 0.1;
const CORE_Z: f32 = 0.2;

const ANGLE_JITTER: f32 = 0.5;
const SPEED_MIN: f32 = 0.003;
const SPEED_SPAN: f32 = 0.005;
const SIZE_MIN: f32 = 1.5;
const SIZE_SPAN: f32 = 2.5;
const OPACITY_MIN: f32 = 0.3;
const OPACITY_SPAN: f32 = 0.5;
const TRAIL_MIN: usize = 5;
const TRAIL_JITTER: usize = 7;
const GLOW_EXTENT: f32 = 8.0;
const PULSE_WIDTH: f32 = 1.0;

// Trail bound is 5 + at most 6; one extra slot absorbs the push before
// eviction without spilling to the heap.
const TRAIL_CAP: usize = 12;

#[derive(Default, States, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HaloSystemsActive {
    #[default]
    False,
    True,
}

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct PulseGizmos;

pub struct OrbitHaloPlugin;
impl Plugin for OrbitHaloPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<HaloSystemsActive>()
            .init_gizmo_group::<PulseGizmos>()
            .add_systems(
                Startup,
                (
                    configure_pulse_lines,
                    OrbitHalo::setup.after(super::particles::ParticleField::setup),
                ),
            )
            .add_systems(Update, activate_systems)
            .add_systems(
                Update,
                (
                    OrbitHalo::advance.in_set(VisualsSystems::Simulate),
                    (OrbitHalo::sync_bodies, OrbitHalo::render_pulses)
                        .in_set(VisualsSystems::Render),
                )
                    .run_if(in_state(HaloSystemsActive::True)),
            );
    }
}

fn activate_systems(mut state: ResMut<NextState<HaloSystemsActive>>, halos: Query<&OrbitHalo>) {
    if !halos.is_empty() {
        state.set(HaloSystemsActive::True)
    } else {
        state.set(HaloSystemsActive::False)
    }
}

fn configure_pulse_lines(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<PulseGizmos>();
    config.line.width = PULSE_WIDTH;
}

/// One orbiting body. Positions are relative to the halo center; the trail
/// holds the most recent positions, oldest first, never more than
/// `trail_len` of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbiter {
    pub angle: f32,
    pub radius: f32,
    pub speed: f32,
    pub size: f32,
    pub opacity: f32,
    pub hue: HaloHue,
    pub trail: SmallVec<[Vec2; TRAIL_CAP]>,
    pub trail_len: usize,
}

impl Orbiter {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin()) * self.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseRing {
    pub radius: f32,
    pub opacity: f32,
    pub hue: HaloHue,
}

struct OrbiterSprites {
    glow: Entity,
    core: Entity,
    trail: Vec<Entity>,
}

#[derive(Component)]
struct HaloSprite;

/// Owns the orbiter set (fixed count) and the pulse set (the one
/// variable-length container; every retained pulse has opacity > 0).
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct OrbitHalo {
    orbiters: Vec<Orbiter>,
    pulses: Vec<PulseRing>,
    sprites: Vec<OrbiterSprites>,
}

impl OrbitHalo {
    pub fn seed(rng: &mut impl Rng, tuning: &HaloTuning) -> Vec<Orbiter> {
        let count = tuning.orbiters;
        (0..count)
            .map(|index| {
                let angle = TAU * index as f32 / count as f32 + rng.random::<f32>() * ANGLE_JITTER;
                let radius = tuning.radius_min + rng.random::<f32>() * tuning.radius_span;
                let magnitude = SPEED_MIN + rng.random::<f32>() * SPEED_SPAN;
                let speed = if rng.random::<f32>() > 0.5 {
                    magnitude
                } else {
                    -magnitude
                };
                Orbiter {
                    angle,
                    radius,
                    speed,
                    size: SIZE_MIN + rng.random::<f32>() * SIZE_SPAN,
                    opacity: OPACITY_MIN + rng.random::<f32>() * OPACITY_SPAN,
                    hue: HaloHue::sample(rng),
                    trail: SmallVec::new(),
                    trail_len: TRAIL_MIN + rng.random_range(0..TRAIL_JITTER),
                }
            })
            .collect()
    }

    /// Pulse emission and decay for one frame. A new ring spawns on the
    /// cadence; every ring then grows and fades, and rings at or below zero
    /// opacity are dropped in the same step.
    pub fn step_pulses(
        pulses: &mut Vec<PulseRing>,
        frame: u64,
        tuning: &HaloTuning,
        rng: &mut impl Rng,
    ) {
        if tuning.pulse_cadence > 0 && frame % tuning.pulse_cadence == 0 {
            pulses.push(PulseRing {
                radius: tuning.pulse_radius,
                opacity: tuning.pulse_opacity,
                hue: HaloHue::sample(rng),
            });
        }

        pulses.retain_mut(|pulse| {
            pulse.radius += tuning.pulse_growth;
            pulse.opacity -= tuning.pulse_decay;
            pulse.opacity > 0.0
        });
    }

    /// Advance every body one angular step and record the new position on
    /// its trail, evicting the oldest entry past the bound.
    pub fn step_orbiters(orbiters: &mut [Orbiter]) {
        for orbiter in orbiters.iter_mut() {
            orbiter.angle += orbiter.speed;
            let position = orbiter.position();
            orbiter.trail.push(position);
            if orbiter.trail.len() > orbiter.trail_len {
                orbiter.trail.remove(0);
            }
        }
    }

    fn setup(
        mut commands: Commands,
        window: Single<&Window, With<PrimaryWindow>>,
        tuning: Res<VisualTuning>,
        mut rng: ResMut<GlobalRng>,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<ColorMaterial>>,
    ) {
        let orbiters = Self::seed(&mut rng.uniform, &tuning.halo);
        let circle = meshes.add(Circle::new(1.0));

        // Anchor the halo over the right-hand side of the window, where the
        // portrait orb sits.
        let anchor = Vec3::new(window.width() * 0.25, 0.0, HALO_Z);

        let mut sprites = Vec::with_capacity(orbiters.len());
        let mut children = Vec::new();
        for orbiter in &orbiters {
            let start = orbiter.position();

            let glow = commands
                .spawn((
                    HaloSprite,
                    Mesh2d(circle.clone()),
                    MeshMaterial2d(materials.add(ColorMaterial::from_color(orbiter.hue.glow()))),
                    Transform {
                        translation: start.extend(GLOW_Z),
                        scale: Vec3::splat(orbiter.size + GLOW_EXTENT),
                        ..default()
                    },
                ))
                .id();

            let core = commands
                .spawn((
                    HaloSprite,
                    Mesh2d(circle.clone()),
                    MeshMaterial2d(materials.add(ColorMaterial::from_color(
                        orbiter.hue.core(orbiter.opacity),
                    ))),
                    Transform {
                        translation: start.extend(CORE_Z),
                        scale: Vec3::splat(orbiter.size),
                        ..default()
                    },
                ))
                .id();

            // One entity per trail slot; alpha and size are fixed per slot
            // (recency rank), only positions move through the slots.
            let mut trail = Vec::with_capacity(orbiter.trail_len);
            for slot in 0..orbiter.trail_len {
                let rank = slot as f32 / orbiter.trail_len as f32;
                let dot = commands
                    .spawn((
                        HaloSprite,
                        Mesh2d(circle.clone()),
                        MeshMaterial2d(materials.add(ColorMaterial::from_color(
                            orbiter.hue.trail(rank * orbiter.opacity * 0.3),
                        ))),
                        Transform {
                            translation: start.extend(TRAIL_Z),
                            scale: Vec3::splat(orbiter.size * rank * 0.5),
                            ..default()
                        },
                        Visibility::Hidden,
                    ))
                    .id();
                trail.push(dot);
            }

            children.push(glow);
            children.push(core);
            children.extend(trail.iter().copied());
            sprites.push(OrbiterSprites { glow, core, trail });
        }

        commands
            .spawn((
                Name::new("orbit_halo"),
                OrbitHalo {
                    orbiters,
                    pulses: Vec::new(),
                    sprites,
                },
                Transform::from_translation(anchor),
            ))
            .add_children(&children);
    }

    fn advance(
        frames: Res<FrameCounter>,
        tuning: Res<VisualTuning>,
        mut rng: ResMut<GlobalRng>,
        mut halos: Query<&mut OrbitHalo>,
    ) {
        for mut halo in &mut halos {
            let halo = halo.as_mut();
            Self::step_pulses(&mut halo.pulses, frames.0, &tuning.halo, &mut rng.uniform);
            Self::step_orbiters(&mut halo.orbiters);
        }
    }

    fn sync_bodies(
        halos: Query<&OrbitHalo>,
        mut sprites: Query<(&mut Transform, &mut Visibility), With<HaloSprite>>,
    ) {
        for halo in &halos {
            for (orbiter, entities) in halo.orbiters.iter().zip(halo.sprites.iter()) {
                let position = orbiter.position();
                if let Ok((mut transform, _)) = sprites.get_mut(entities.core) {
                    transform.translation = position.extend(CORE_Z);
                }
                if let Ok((mut transform, _)) = sprites.get_mut(entities.glow) {
                    transform.translation = position.extend(GLOW_Z);
                }

                // Map trail entries onto the brightest slots so a partially
                // filled trail still ends at full brightness.
                let len = orbiter.trail.len();
                let hidden = orbiter.trail_len.saturating_sub(len);
                for (slot, &dot) in entities.trail.iter().enumerate() {
                    let Ok((mut transform, mut visibility)) = sprites.get_mut(dot) else {
                        continue;
                    };
                    if slot < hidden {
                        *visibility = Visibility::Hidden;
                    } else {
                        *visibility = Visibility::Visible;
                        let entry = orbiter.trail[slot - hidden];
                        transform.translation = entry.extend(TRAIL_Z);
                    }
                }
            }
        }
    }

    fn render_pulses(
        metrics: Res<SurfaceMetrics>,
        halos: Query<(&OrbitHalo, &Transform)>,
        mut gizmos: Gizmos<PulseGizmos>,
    ) {
        if !metrics.is_drawable() {
            return;
        }

        for (halo, transform) in &halos {
            let center = transform.translation.truncate();
            for pulse in &halo.pulses {
                gizmos.circle_2d(center, pulse.radius, pulse.hue.ring(pulse.opacity));
            }
        }
    }
}
