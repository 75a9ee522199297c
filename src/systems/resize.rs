use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized, WindowScaleFactorChanged},
};

use crate::systems::time::VisualsSystems;

pub struct SurfacePlugin;
impl Plugin for SurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceMetrics>()
            .add_systems(Update, refresh_metrics.in_set(VisualsSystems::Input));
    }
}

/// Snapshot of the drawable surface taken before each simulation step.
/// Logical coordinates are what the effects simulate in; the physical size
/// is the backing store (logical × device scale factor) the renderer
/// targets. Recomputing from identical window dimensions is a no-op.
#[derive(Resource, Default, Clone, Copy, PartialEq, Debug)]
pub struct SurfaceMetrics {
    pub logical: Vec2,
    pub physical: UVec2,
    pub scale_factor: f32,
}

impl SurfaceMetrics {
    pub fn from_window(window: &Window) -> Self {
        let logical = Vec2::new(window.width(), window.height());
        let scale_factor = window.scale_factor();
        let physical = UVec2::new(
            (logical.x * scale_factor).round() as u32,
            (logical.y * scale_factor).round() as u32,
        );
        Self {
            logical,
            physical,
            scale_factor,
        }
    }

    /// A minimized or mid-layout window can report zero area; effects render
    /// nothing rather than dividing by it.
    pub fn is_drawable(&self) -> bool {
        self.physical.x > 0 && self.physical.y > 0
    }

    /// Effects simulate in top-left-origin surface coordinates; world space
    /// is centered with +y up.
    pub fn surface_to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x - self.logical.x * 0.5,
            self.logical.y * 0.5 - point.y,
        )
    }
}

fn refresh_metrics(
    mut resized: EventReader<WindowResized>,
    mut rescaled: EventReader<WindowScaleFactorChanged>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut metrics: ResMut<SurfaceMetrics>,
) {
    let dirty = resized.read().last().is_some() | rescaled.read().last().is_some();
    let uninitialized = metrics.scale_factor == 0.0;
    if !dirty && !uninitialized {
        return;
    }

    let next = SurfaceMetrics::from_window(&window);
    if *metrics != next {
        *metrics = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(width: f32, height: f32, scale: f32) -> Window {
        let mut window = Window::default();
        window.resolution.set_scale_factor(scale);
        window.resolution.set(width, height);
        window
    }

    #[test]
    fn physical_size_scales_with_dpr() {
        let metrics = SurfaceMetrics::from_window(&window(800.0, 600.0, 2.0));
        assert_eq!(metrics.logical, Vec2::new(800.0, 600.0));
        assert_eq!(metrics.physical, UVec2::new(1600, 1200));
    }

    #[test]
    fn recompute_is_idempotent() {
        let window = window(1280.0, 720.0, 1.5);
        let first = SurfaceMetrics::from_window(&window);
        let second = SurfaceMetrics::from_window(&window);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_area_surface_is_not_drawable() {
        let metrics = SurfaceMetrics::from_window(&window(0.0, 600.0, 1.0));
        assert!(!metrics.is_drawable());
        assert!(SurfaceMetrics::default().physical == UVec2::ZERO);
    }

    #[test]
    fn surface_to_world_centers_and_flips_y() {
        let metrics = SurfaceMetrics::from_window(&window(800.0, 600.0, 1.0));
        assert_eq!(metrics.surface_to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        assert_eq!(
            metrics.surface_to_world(Vec2::new(400.0, 300.0)),
            Vec2::ZERO
        );
    }
}
