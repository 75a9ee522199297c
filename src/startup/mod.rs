use bevy::{prelude::*, window::PrimaryWindow};

pub mod cursor;
pub mod render;
pub mod shortcuts;

use cursor::CursorPlugin;
use render::RenderPlugin;

use crate::{
    data::{rng::RngPlugin, tuning::VisualTuning},
    systems::{
        colors::HEADLINE_COLOR,
        counters::{CountersPlugin, StatCounter},
        halo::OrbitHaloPlugin,
        interaction::PointerPlugin,
        particles::ParticleFieldPlugin,
        resize::SurfacePlugin,
        time::FramePlugin,
        typing::{TypedHeadline, TypingPlugin},
    },
};

pub struct StartupPlugin;
impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(VisualTuning::embedded())
            .add_plugins((
                RngPlugin,
                FramePlugin,
                SurfacePlugin,
                PointerPlugin,
                RenderPlugin,
                CursorPlugin,
                ParticleFieldPlugin,
                OrbitHaloPlugin,
                TypingPlugin,
                CountersPlugin,
            ))
            .add_systems(Update, shortcuts::close_on_esc)
            .add_systems(Startup, spawn_showcase);
    }
}

const TEXT_Z: f32 = 2.0;

fn spawn_showcase(mut commands: Commands, window: Single<&Window, With<PrimaryWindow>>) {
    let left = -window.width() * 0.25;

    commands.spawn((
        Name::new("typed_headline"),
        TypedHeadline::new(vec![
            "Semiconductor Engineer".into(),
            "RF Engineer".into(),
            "TNSCST Funded Researcher".into(),
            "VLSI Designer".into(),
        ]),
        Text2d::new(""),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        TextColor(HEADLINE_COLOR),
        Transform::from_translation(Vec3::new(left, 120.0, TEXT_Z)),
    ));

    let stats: [(&str, f32); 3] = [("Projects", 24.0), ("Certifications", 6.0), ("CGPA", 9.2)];
    for (index, (label, target)) in stats.into_iter().enumerate() {
        let x = left + (index as f32 - 1.0) * 180.0;

        commands.spawn((
            Name::new(format!("counter_{label}")),
            StatCounter::new(target),
            Text2d::new("0"),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(HEADLINE_COLOR),
            Transform::from_translation(Vec3::new(x, -120.0, TEXT_Z)),
        ));

        commands.spawn((
            Text2d::new(label),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(HEADLINE_COLOR.with_alpha(0.6)),
            Transform::from_translation(Vec3::new(x, -156.0, TEXT_Z)),
        ));
    }
}
