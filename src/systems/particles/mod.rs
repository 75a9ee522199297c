//! Hero particle field: a fixed set of drifting particles on a toroidal
//! surface, pairwise proximity connections, and pointer attraction. All
//! motion is unit-step per frame; visual speed follows the display refresh
//! rate rather than wall-clock time.

use bevy::{prelude::*, window::PrimaryWindow};
use rand::Rng;

use crate::{
    data::{
        rng::GlobalRng,
        tuning::{FieldTuning, VisualTuning},
    },
    systems::{
        colors::FIELD_COLOR, interaction::PointerState, resize::SurfaceMetrics,
        time::VisualsSystems,
    },
};

#[cfg(test)]
mod tests;

const FIELD_Z: f32 = 0.0;

const RADIUS_MIN: f32 = 1.5;
const RADIUS_SPAN: f32 = 2.0;
const OPACITY_MIN: f32 = 0.12;
const OPACITY_SPAN: f32 = 0.2;
const CONNECTION_WIDTH: f32 = 0.8;

#[derive(Default, States, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSystemsActive {
    #[default]
    False,
    True,
}

/// Connection lines get their own gizmo group so their stroke width can
/// differ from the halo's pulse rings.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ConnectionGizmos;

pub struct ParticleFieldPlugin;
impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<FieldSystemsActive>()
            .init_gizmo_group::<ConnectionGizmos>()
            .add_systems(Startup, (configure_connection_lines, ParticleField::setup))
            .add_systems(Update, activate_systems)
            .add_systems(
                Update,
                (
                    ParticleField::advance.in_set(VisualsSystems::Simulate),
                    (ParticleField::sync_bodies, ParticleField::render_connections)
                        .in_set(VisualsSystems::Render),
                )
                    .run_if(in_state(FieldSystemsActive::True)),
            );
    }
}

fn activate_systems(
    mut state: ResMut<NextState<FieldSystemsActive>>,
    fields: Query<&ParticleField>,
) {
    if !fields.is_empty() {
        state.set(FieldSystemsActive::True)
    } else {
        state.set(FieldSystemsActive::False)
    }
}

fn configure_connection_lines(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<ConnectionGizmos>();
    config.line.width = CONNECTION_WIDTH;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Component)]
struct FieldBody;

/// Owns the particle set for its lifetime: seeded once, never resized.
/// Positions live in top-left-origin surface coordinates; the spawned body
/// entities are presentation only and follow the simulation each frame.
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bodies: Vec<Entity>,
}

impl ParticleField {
    pub fn seed(rng: &mut impl Rng, bounds: Vec2, tuning: &FieldTuning) -> Vec<Particle> {
        (0..tuning.particles)
            .map(|_| Particle {
                position: Vec2::new(
                    rng.random::<f32>() * bounds.x,
                    rng.random::<f32>() * bounds.y,
                ),
                velocity: Vec2::new(
                    (rng.random::<f32>() - 0.5) * tuning.drift,
                    (rng.random::<f32>() - 0.5) * tuning.drift,
                ),
                radius: RADIUS_MIN + rng.random::<f32>() * RADIUS_SPAN,
                opacity: OPACITY_MIN + rng.random::<f32>() * OPACITY_SPAN,
            })
            .collect()
    }

    /// One simulation frame: integrate, wrap, then apply pointer attraction.
    /// Attraction damps velocity in the same pass it nudges it, and only
    /// inside the interaction radius.
    pub fn step(
        particles: &mut [Particle],
        bounds: Vec2,
        pointer: Option<Vec2>,
        tuning: &FieldTuning,
    ) {
        for particle in particles.iter_mut() {
            particle.position += particle.velocity;
            particle.position.x = wrap(particle.position.x, bounds.x);
            particle.position.y = wrap(particle.position.y, bounds.y);
        }

        let Some(cursor) = pointer else { return };
        for particle in particles.iter_mut() {
            let offset = cursor - particle.position;
            if offset.length() < tuning.attraction_radius {
                particle.velocity += offset * tuning.attraction_strength;
                particle.velocity *= tuning.attraction_damping;
            }
        }
    }

    pub(crate) fn setup(
        mut commands: Commands,
        window: Single<&Window, With<PrimaryWindow>>,
        tuning: Res<VisualTuning>,
        mut rng: ResMut<GlobalRng>,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<ColorMaterial>>,
    ) {
        let bounds = Vec2::new(window.width(), window.height());
        if bounds.x <= 0.0 || bounds.y <= 0.0 {
            warn!("Particle field disabled: window has no drawable area");
            return;
        }

        let metrics = SurfaceMetrics::from_window(&window);
        let particles = Self::seed(&mut rng.uniform, bounds, &tuning.field);
        let circle = meshes.add(Circle::new(1.0));

        let mut bodies = Vec::with_capacity(particles.len());
        for particle in &particles {
            let body = commands
                .spawn((
                    FieldBody,
                    Mesh2d(circle.clone()),
                    MeshMaterial2d(materials.add(ColorMaterial::from_color(
                        FIELD_COLOR.with_alpha(particle.opacity),
                    ))),
                    Transform {
                        translation: metrics.surface_to_world(particle.position).extend(FIELD_Z),
                        scale: Vec3::splat(particle.radius),
                        ..default()
                    },
                ))
                .id();
            bodies.push(body);
        }

        commands
            .spawn((
                Name::new("particle_field"),
                ParticleField {
                    particles,
                    bodies: bodies.clone(),
                },
            ))
            .add_children(&bodies);
    }

    fn advance(
        metrics: Res<SurfaceMetrics>,
        pointer: Res<PointerState>,
        tuning: Res<VisualTuning>,
        mut fields: Query<&mut ParticleField>,
    ) {
        if !metrics.is_drawable() {
            return;
        }

        for mut field in &mut fields {
            Self::step(
                &mut field.particles,
                metrics.logical,
                pointer.position,
                &tuning.field,
            );
        }
    }

    fn sync_bodies(
        metrics: Res<SurfaceMetrics>,
        fields: Query<&ParticleField>,
        mut transforms: Query<&mut Transform, With<FieldBody>>,
    ) {
        if !metrics.is_drawable() {
            return;
        }

        for field in &fields {
            for (particle, &body) in field.particles.iter().zip(field.bodies.iter()) {
                if let Ok(mut transform) = transforms.get_mut(body) {
                    transform.translation =
                        metrics.surface_to_world(particle.position).extend(FIELD_Z);
                }
            }
        }
    }

    /// Connections are recomputed from this frame's positions. The pass is
    /// O(n²) over a small fixed n; a larger field would need spatial
    /// partitioning while keeping the all-pairs-under-threshold contract.
    fn render_connections(
        metrics: Res<SurfaceMetrics>,
        tuning: Res<VisualTuning>,
        fields: Query<&ParticleField>,
        mut gizmos: Gizmos<ConnectionGizmos>,
    ) {
        if !metrics.is_drawable() {
            return;
        }

        let threshold = tuning.field.connection_distance;
        for field in &fields {
            for i in 0..field.particles.len() {
                for j in (i + 1)..field.particles.len() {
                    let a = field.particles[i].position;
                    let b = field.particles[j].position;
                    let distance = a.distance(b);
                    if distance < threshold {
                        let alpha = tuning.field.connection_alpha * (1.0 - distance / threshold);
                        gizmos.line_2d(
                            metrics.surface_to_world(a),
                            metrics.surface_to_world(b),
                            FIELD_COLOR.with_alpha(alpha),
                        );
                    }
                }
            }
        }
    }
}

// Toroidal wrap keeping coordinates in [0, extent); velocity is untouched.
fn wrap(value: f32, extent: f32) -> f32 {
    value.rem_euclid(extent)
}
