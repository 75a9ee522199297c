use bevy::{
    core_pipeline::{bloom::Bloom, tonemapping::Tonemapping},
    prelude::*,
};

use crate::systems::colors::BACKDROP_COLOR;

pub struct RenderPlugin;
impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

fn setup_camera(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = BACKDROP_COLOR;

    // HDR + bloom gives the halo cores their glow without a post pass.
    commands.spawn((
        Camera2d,
        MainCamera,
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Bloom::default(),
    ));
}
