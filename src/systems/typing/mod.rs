//! Typewriter headline: cycles through a phrase list, typing forward and
//! deleting back with different cadences, holding on a completed phrase.

use bevy::prelude::*;
use std::time::Duration;

const TYPE_MS: u64 = 70;
const DELETE_MS: u64 = 35;
const HOLD_MS: u64 = 2200;
const RESUME_MS: u64 = 400;

pub struct TypingPlugin;
impl Plugin for TypingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, TypedHeadline::enact);
    }
}

#[derive(Component)]
pub struct TypedHeadline {
    phrases: Vec<String>,
    phrase: usize,
    chars: usize,
    deleting: bool,
    timer: Timer,
}

impl TypedHeadline {
    pub fn new(phrases: Vec<String>) -> Self {
        let phrases = if phrases.is_empty() {
            warn!("TypedHeadline created without phrases");
            vec![String::new()]
        } else {
            phrases
        };

        Self {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
            timer: Timer::new(Duration::from_millis(TYPE_MS), TimerMode::Once),
        }
    }

    pub fn visible_text(&self) -> String {
        self.phrases[self.phrase].chars().take(self.chars).collect()
    }

    /// One tick of the typewriter state machine. Returns the delay until
    /// the next tick: fast while deleting, a long hold on a completed
    /// phrase, a short pause before the next phrase starts.
    fn tick_state(&mut self) -> u64 {
        let length = self.phrases[self.phrase].chars().count();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            if self.chars == 0 {
                self.deleting = false;
                self.phrase = (self.phrase + 1) % self.phrases.len();
                RESUME_MS
            } else {
                DELETE_MS
            }
        } else {
            self.chars = (self.chars + 1).min(length);
            if self.chars == length {
                self.deleting = true;
                HOLD_MS
            } else {
                TYPE_MS
            }
        }
    }

    fn enact(time: Res<Time>, mut query: Query<(&mut TypedHeadline, &mut Text2d)>) {
        for (mut headline, mut text) in &mut query {
            headline.timer.tick(time.delta());
            if !headline.timer.finished() {
                continue;
            }

            let delay = headline.tick_state();
            text.0 = headline.visible_text();
            headline.timer.set_duration(Duration::from_millis(delay));
            headline.timer.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline() -> TypedHeadline {
        TypedHeadline::new(vec!["ab".into(), "xyz".into()])
    }

    #[test]
    fn types_forward_then_holds_on_the_full_phrase() {
        let mut headline = headline();

        assert_eq!(headline.tick_state(), TYPE_MS);
        assert_eq!(headline.visible_text(), "a");
        assert_eq!(headline.tick_state(), HOLD_MS);
        assert_eq!(headline.visible_text(), "ab");
        assert!(headline.deleting);
    }

    #[test]
    fn deletes_back_and_advances_to_the_next_phrase() {
        let mut headline = headline();
        headline.tick_state();
        headline.tick_state();

        assert_eq!(headline.tick_state(), DELETE_MS);
        assert_eq!(headline.visible_text(), "a");
        assert_eq!(headline.tick_state(), RESUME_MS);
        assert_eq!(headline.visible_text(), "");
        assert_eq!(headline.phrase, 1);

        for _ in 0..3 {
            headline.tick_state();
        }
        assert_eq!(headline.visible_text(), "xyz");
    }

    #[test]
    fn wraps_back_to_the_first_phrase() {
        let mut headline = headline();
        // Full cycle over both phrases: type 2 + delete 2, type 3 + delete 3.
        for _ in 0..10 {
            headline.tick_state();
        }
        assert_eq!(headline.phrase, 0);
        assert!(!headline.deleting);
    }

    #[test]
    fn empty_phrase_list_degrades_to_a_blank_headline() {
        let mut headline = TypedHeadline::new(Vec::new());
        headline.tick_state();
        assert_eq!(headline.visible_text(), "");
    }
}
