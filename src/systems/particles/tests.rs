use bevy::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use super::{wrap, Particle, ParticleField};
use crate::{
    data::{
        rng::GlobalRng,
        tuning::{FieldTuning, VisualTuning},
    },
    systems::{interaction::PointerState, resize::SurfaceMetrics},
};

const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

fn seeded_particles(seed: u64) -> Vec<Particle> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    ParticleField::seed(&mut rng, BOUNDS, &FieldTuning::default())
}

fn in_bounds(particle: &Particle) -> bool {
    (0.0..BOUNDS.x).contains(&particle.position.x) && (0.0..BOUNDS.y).contains(&particle.position.y)
}

#[test]
fn seeding_matches_the_creation_contract() {
    let particles = seeded_particles(42);
    let tuning = FieldTuning::default();

    assert_eq!(particles.len(), tuning.particles);
    for particle in &particles {
        assert!(in_bounds(particle));
        assert!(particle.velocity.x.abs() <= tuning.drift / 2.0);
        assert!(particle.velocity.y.abs() <= tuning.drift / 2.0);
        assert!((1.5..3.5).contains(&particle.radius));
        assert!((0.12..0.32).contains(&particle.opacity));
    }
}

#[test]
fn two_hundred_steps_stay_finite_and_in_bounds() {
    let tuning = FieldTuning::default();
    let mut particles = seeded_particles(7);
    let count = particles.len();

    for _ in 0..200 {
        ParticleField::step(&mut particles, BOUNDS, None, &tuning);
        for particle in &particles {
            assert!(particle.position.is_finite());
            assert!(particle.velocity.is_finite());
            assert!(in_bounds(particle));
        }
    }

    assert_eq!(particles.len(), count);
}

#[test]
fn wrap_reappears_at_the_opposite_edge_with_velocity_intact() {
    let tuning = FieldTuning::default();
    let mut particles = vec![Particle {
        position: Vec2::new(799.9, 10.0),
        velocity: Vec2::new(0.2, 0.0),
        radius: 2.0,
        opacity: 0.2,
    }];

    ParticleField::step(&mut particles, BOUNDS, None, &tuning);
    assert!((particles[0].position.x - 0.1).abs() < 1.0e-3);
    assert_eq!(particles[0].velocity, Vec2::new(0.2, 0.0));

    particles[0].position = Vec2::new(0.05, 10.0);
    particles[0].velocity = Vec2::new(-0.2, 0.0);
    ParticleField::step(&mut particles, BOUNDS, None, &tuning);
    assert!((particles[0].position.x - 799.85).abs() < 1.0e-3);
    assert_eq!(particles[0].velocity, Vec2::new(-0.2, 0.0));
}

#[test]
fn wrap_is_the_identity_inside_the_surface() {
    assert_eq!(wrap(123.4, 800.0), 123.4);
    assert_eq!(wrap(0.0, 800.0), 0.0);
    assert!(wrap(-0.5, 800.0) >= 0.0);
    assert!(wrap(800.5, 800.0) < 800.0);
}

#[test]
fn identical_seeds_replay_bit_identically() {
    let tuning = FieldTuning::default();
    let mut first = seeded_particles(99);
    let mut second = seeded_particles(99);

    for _ in 0..200 {
        ParticleField::step(&mut first, BOUNDS, None, &tuning);
        ParticleField::step(&mut second, BOUNDS, None, &tuning);
    }

    assert_eq!(first, second);
}

#[test]
fn attraction_accelerates_but_stays_bounded() {
    let tuning = FieldTuning::default();
    let pointer = Some(Vec2::new(450.0, 300.0));
    let mut particles = vec![Particle {
        position: Vec2::new(400.0, 300.0),
        velocity: Vec2::ZERO,
        radius: 2.0,
        opacity: 0.2,
    }];

    let mut previous_speed = 0.0;
    for _ in 0..10 {
        ParticleField::step(&mut particles, BOUNDS, pointer, &tuning);
        let speed = particles[0].velocity.length();
        assert!(speed > previous_speed);
        previous_speed = speed;
    }

    // Each nudge is at most radius * strength, so ten frames of damped
    // accumulation must stay below the undamped sum.
    let per_frame_cap = tuning.attraction_radius * tuning.attraction_strength;
    assert!(previous_speed < per_frame_cap * 10.0);
}

#[test]
fn particles_outside_the_interaction_radius_are_untouched() {
    let tuning = FieldTuning::default();
    let pointer = Some(Vec2::new(700.0, 500.0));
    let mut particles = vec![Particle {
        position: Vec2::new(100.0, 100.0),
        velocity: Vec2::new(0.1, -0.1),
        radius: 2.0,
        opacity: 0.2,
    }];

    ParticleField::step(&mut particles, BOUNDS, pointer, &tuning);
    assert_eq!(particles[0].velocity, Vec2::new(0.1, -0.1));
}

#[test]
fn advance_system_steps_fields_inside_an_app() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(GlobalRng::seeded(5))
        .insert_resource(VisualTuning::default())
        .insert_resource(PointerState::default())
        .insert_resource(SurfaceMetrics {
            logical: BOUNDS,
            physical: UVec2::new(800, 600),
            scale_factor: 1.0,
        })
        .add_systems(Update, ParticleField::advance);

    let particles = seeded_particles(5);
    let initial = particles.clone();
    app.world_mut().spawn(ParticleField {
        particles,
        bodies: Vec::new(),
    });

    for _ in 0..3 {
        app.update();
    }

    let mut fields = app.world_mut().query::<&ParticleField>();
    let field = fields.single(app.world()).unwrap();
    assert_eq!(field.particles.len(), initial.len());
    assert_ne!(field.particles, initial);
    for particle in &field.particles {
        assert!(in_bounds(particle));
    }
}
