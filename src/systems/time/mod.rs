use bevy::prelude::*;

/// Per-frame ordering for the whole visual stack: event snapshots first,
/// then the frame counter, then simulation, then draw output. Effects never
/// call back into the scheduler; they only read what Input/Tick produced.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum VisualsSystems {
    Input,
    Tick,
    Simulate,
    Render,
}

/// Monotonic frame count. Effects that run on a frame cadence (pulse
/// emission) read this instead of wall-clock time so that visual speed
/// tracks the display refresh rate, matching the unit-step integration.
#[derive(Resource, Default)]
pub struct FrameCounter(pub u64);

pub struct FramePlugin;
impl Plugin for FramePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameCounter>()
            .configure_sets(
                Update,
                (
                    VisualsSystems::Input,
                    VisualsSystems::Tick,
                    VisualsSystems::Simulate,
                    VisualsSystems::Render,
                )
                    .chain(),
            )
            .add_systems(Update, advance_frame.in_set(VisualsSystems::Tick));
    }
}

fn advance_frame(mut counter: ResMut<FrameCounter>) {
    counter.0 = counter.0.wrapping_add(1);
}
