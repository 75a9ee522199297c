use bevy::{
    prelude::*,
    window::{CursorLeft, CursorMoved},
};

use crate::systems::time::VisualsSystems;

pub struct PointerPlugin;
impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .add_systems(Update, track_pointer.in_set(VisualsSystems::Input));
    }
}

/// Last reported pointer position in top-left-origin window coordinates,
/// or `None` while the pointer is outside the window. Written only here;
/// every simulator reads it as a per-frame snapshot.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub position: Option<Vec2>,
}

fn track_pointer(
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    mut pointer: ResMut<PointerState>,
) {
    let last_move = moved.read().last().map(|event| event.position);
    let departed = left.read().last().is_some();

    // A move event in the same frame as a leave event means the pointer
    // re-entered; the move wins.
    match (last_move, departed) {
        (Some(position), _) => pointer.position = Some(position),
        (None, true) => pointer.position = None,
        (None, false) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer_app() -> App {
        let mut app = App::new();
        app.add_event::<CursorMoved>()
            .add_event::<CursorLeft>()
            .init_resource::<PointerState>()
            .add_systems(Update, track_pointer);
        app
    }

    fn send_move(app: &mut App, position: Vec2) {
        let window = Entity::PLACEHOLDER;
        app.world_mut().send_event(CursorMoved {
            window,
            position,
            delta: None,
        });
    }

    #[test]
    fn pointer_absent_until_first_move() {
        let mut app = pointer_app();
        app.update();
        assert_eq!(app.world().resource::<PointerState>().position, None);

        send_move(&mut app, Vec2::new(120.0, 80.0));
        app.update();
        assert_eq!(
            app.world().resource::<PointerState>().position,
            Some(Vec2::new(120.0, 80.0))
        );
    }

    #[test]
    fn leaving_the_window_clears_the_pointer() {
        let mut app = pointer_app();
        send_move(&mut app, Vec2::new(10.0, 10.0));
        app.update();

        app.world_mut().send_event(CursorLeft {
            window: Entity::PLACEHOLDER,
        });
        app.update();
        assert_eq!(app.world().resource::<PointerState>().position, None);
    }

    #[test]
    fn latest_move_in_a_frame_wins() {
        let mut app = pointer_app();
        send_move(&mut app, Vec2::new(1.0, 1.0));
        send_move(&mut app, Vec2::new(2.0, 2.0));
        app.update();
        assert_eq!(
            app.world().resource::<PointerState>().position,
            Some(Vec2::new(2.0, 2.0))
        );
    }
}
