use bevy::prelude::*;

use crate::systems::{
    colors::ACCENT_COLOR, interaction::PointerState, resize::SurfaceMetrics, time::VisualsSystems,
};

const CURSOR_Z: f32 = 999.0;
const DOT_RADIUS: f32 = 3.0;
const RING_RADIUS: f32 = 15.0;
const RING_EASE: f32 = 0.15;

pub struct CursorPlugin;
impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorTrail>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    follow_pointer.in_set(VisualsSystems::Simulate),
                    render_ring.in_set(VisualsSystems::Render),
                ),
            );
    }
}

#[derive(Component)]
struct CursorDot;

/// Eased ring position trailing the pointer; `None` until the pointer has
/// entered the window for the first time.
#[derive(Resource, Default)]
pub struct CursorTrail {
    eased: Option<Vec2>,
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        CursorDot,
        Mesh2d(meshes.add(Circle::new(DOT_RADIUS))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(ACCENT_COLOR))),
        Transform::from_translation(Vec3::new(0.0, 0.0, CURSOR_Z)),
        Visibility::Hidden,
    ));
}

fn follow_pointer(
    pointer: Res<PointerState>,
    metrics: Res<SurfaceMetrics>,
    mut trail: ResMut<CursorTrail>,
    mut dot: Single<(&mut Transform, &mut Visibility), With<CursorDot>>,
) {
    let Some(position) = pointer.position else {
        return;
    };

    let world = metrics.surface_to_world(position);
    let (transform, visibility) = &mut *dot;
    transform.translation = world.extend(CURSOR_Z);
    **visibility = Visibility::Visible;

    let eased = trail.eased.get_or_insert(world);
    *eased += (world - *eased) * RING_EASE;
}

fn render_ring(trail: Res<CursorTrail>, mut gizmos: Gizmos) {
    if let Some(position) = trail.eased {
        gizmos.circle_2d(position, RING_RADIUS, ACCENT_COLOR.with_alpha(0.6));
    }
}
