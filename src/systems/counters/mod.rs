//! Stat counters that count up from zero with a cubic ease-out once
//! spawned. Integer targets render as integers, fractional targets with
//! one decimal.

use bevy::prelude::*;
use std::time::Duration;

const COUNT_UP: Duration = Duration::from_millis(1500);

pub struct CountersPlugin;
impl Plugin for CountersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, StatCounter::enact);
    }
}

#[derive(Component)]
pub struct StatCounter {
    pub target: f32,
    timer: Timer,
}

impl StatCounter {
    pub fn new(target: f32) -> Self {
        Self {
            target,
            timer: Timer::new(COUNT_UP, TimerMode::Once),
        }
    }

    fn eased_value(&self, fraction: f32) -> f32 {
        let eased = 1.0 - (1.0 - fraction).powi(3);
        self.target * eased
    }

    fn format(&self, value: f32) -> String {
        if self.target.fract() != 0.0 {
            format!("{value:.1}")
        } else {
            format!("{}", value.round() as i64)
        }
    }

    fn enact(time: Res<Time>, mut query: Query<(&mut StatCounter, &mut Text2d)>) {
        for (mut counter, mut text) in &mut query {
            if counter.timer.finished() {
                continue;
            }
            counter.timer.tick(time.delta());
            let value = counter.eased_value(counter.timer.fraction());
            text.0 = counter.format(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_from_zero_to_the_target() {
        let counter = StatCounter::new(120.0);
        assert_eq!(counter.eased_value(0.0), 0.0);
        assert_eq!(counter.eased_value(1.0), 120.0);
    }

    #[test]
    fn easing_is_monotone_and_front_loaded() {
        let counter = StatCounter::new(100.0);
        let mut previous = -1.0;
        for step in 0..=10 {
            let value = counter.eased_value(step as f32 / 10.0);
            assert!(value >= previous);
            previous = value;
        }
        // Ease-out covers more than half the distance by the midpoint.
        assert!(counter.eased_value(0.5) > 50.0);
    }

    #[test]
    fn fractional_targets_keep_one_decimal() {
        let counter = StatCounter::new(4.5);
        assert_eq!(counter.format(counter.eased_value(1.0)), "4.5");

        let counter = StatCounter::new(40.0);
        assert_eq!(counter.format(counter.eased_value(1.0)), "40");
    }
}
