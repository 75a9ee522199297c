use bevy::prelude::*;

mod data;
mod startup;
mod systems;

use startup::StartupPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Silicon Nexus".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(StartupPlugin)
        .run();
}
