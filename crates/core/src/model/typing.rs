use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ConfigError;

/// Fixed, non-empty, cyclic list of phrases for the typewriter decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseQueue {
    phrases: Vec<String>,
}

impl PhraseQueue {
    pub fn new<I, S>(phrases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(ConfigError::EmptyPhraseQueue);
        }
        Ok(Self { phrases })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrase at `index`, wrapping past the end.
    pub fn get(&self, index: usize) -> &str {
        &self.phrases[index % self.phrases.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

/// Tick intervals of the typewriter, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingTimings {
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    /// Pause with the full phrase on screen before deleting starts.
    pub delay_between_texts_ms: u64,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_speed_ms: 100,
            delete_speed_ms: 50,
            delay_between_texts_ms: 2000,
        }
    }
}

impl TypingTimings {
    /// Both tick intervals must be positive; the pause may be zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.type_speed_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "type_speed_ms",
            });
        }
        if self.delete_speed_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "delete_speed_ms",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypingPhase {
    /// Prefix growing, or holding the full phrase before deleting.
    Typing,
    /// Prefix shrinking.
    Deleting,
}

/// Typewriter state machine over a [`PhraseQueue`].
///
/// Time-free: [`next_delay_ms`](Self::next_delay_ms) says how long to wait
/// before the next [`step`](Self::step), and the host's timer does the
/// waiting. Transitions:
///
/// - `Typing`, prefix shorter than the phrase: grow by one char.
/// - `Typing`, prefix complete: after the pause, switch to `Deleting`.
/// - `Deleting`, prefix non-empty: shrink by one char.
/// - `Deleting`, prefix empty: advance to the next phrase (wrapping), switch
///   to `Typing`.
#[derive(Debug, Clone)]
pub struct TypingCycler {
    phrases: PhraseQueue,
    timings: TypingTimings,
    index: usize,
    /// Displayed prefix length in chars; always `<= phrase_chars`.
    prefix_chars: usize,
    phrase_chars: usize,
    phase: TypingPhase,
}

impl TypingCycler {
    pub fn new(phrases: PhraseQueue, timings: TypingTimings) -> Result<Self, ConfigError> {
        timings.validate()?;
        let phrase_chars = phrases.get(0).chars().count();
        Ok(Self {
            phrases,
            timings,
            index: 0,
            prefix_chars: 0,
            phrase_chars,
            phase: TypingPhase::Typing,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == TypingPhase::Deleting
    }

    pub fn timings(&self) -> TypingTimings {
        self.timings
    }

    pub fn phrases(&self) -> &PhraseQueue {
        &self.phrases
    }

    pub fn current_phrase(&self) -> &str {
        self.phrases.get(self.index)
    }

    /// The displayed prefix of the current phrase.
    pub fn prefix(&self) -> &str {
        let phrase = self.current_phrase();
        let end = phrase
            .char_indices()
            .nth(self.prefix_chars)
            .map_or(phrase.len(), |(i, _)| i);
        &phrase[..end]
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_chars
    }

    fn is_complete(&self) -> bool {
        self.prefix_chars == self.phrase_chars
    }

    /// Wait before the next [`step`](Self::step).
    pub fn next_delay_ms(&self) -> u64 {
        match self.phase {
            TypingPhase::Typing if self.is_complete() => self.timings.delay_between_texts_ms,
            TypingPhase::Typing => self.timings.type_speed_ms,
            TypingPhase::Deleting => self.timings.delete_speed_ms,
        }
    }

    /// Apply one transition. Returns whether the displayed prefix changed.
    pub fn step(&mut self) -> bool {
        match self.phase {
            TypingPhase::Typing if self.is_complete() => {
                self.phase = TypingPhase::Deleting;
                false
            }
            TypingPhase::Typing => {
                self.prefix_chars += 1;
                true
            }
            TypingPhase::Deleting if self.prefix_chars > 0 => {
                self.prefix_chars -= 1;
                true
            }
            TypingPhase::Deleting => {
                self.index = (self.index + 1) % self.phrases.len();
                self.phrase_chars = self.current_phrase().chars().count();
                self.phase = TypingPhase::Typing;
                trace!(index = self.index, phrase = self.current_phrase(), "next phrase");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fast(phrases: &[&str]) -> TypingCycler {
        let queue = PhraseQueue::new(phrases.iter().copied()).unwrap();
        TypingCycler::new(
            queue,
            TypingTimings {
                type_speed_ms: 1,
                delete_speed_ms: 1,
                delay_between_texts_ms: 0,
            },
        )
        .unwrap()
    }

    /// Prefix after each step, starting with the initial empty prefix.
    fn frames(cycler: &mut TypingCycler, steps: usize) -> Vec<String> {
        let mut out = vec![cycler.prefix().to_owned()];
        for _ in 0..steps {
            cycler.step();
            out.push(cycler.prefix().to_owned());
        }
        out
    }

    #[test]
    fn starts_typing_first_phrase_from_empty() {
        let cycler = fast(&["A", "BB"]);
        assert_eq!(cycler.index(), 0);
        assert_eq!(cycler.prefix(), "");
        assert_eq!(cycler.phase(), TypingPhase::Typing);
    }

    #[test]
    fn cycles_through_two_phrases() {
        let mut cycler = fast(&["A", "BB"]);
        let seen = frames(&mut cycler, 10);
        // type, hold->delete, delete, advance, type, type, hold->delete,
        // delete, delete, advance
        assert_eq!(
            seen,
            vec!["", "A", "A", "", "", "B", "BB", "BB", "B", "", ""]
        );
        assert_eq!(cycler.index(), 0);
        assert_eq!(cycler.phase(), TypingPhase::Typing);
    }

    #[test]
    fn period_is_two_steps_per_char_plus_two_per_phrase() {
        let mut cycler = fast(&["A", "BB"]);
        let period = 2 * (1 + 2) + 2 * 2;
        let first = frames(&mut cycler, period);
        let second = frames(&mut cycler, period);
        assert_eq!(first, second);
    }

    #[test]
    fn delays_follow_phase() {
        let queue = PhraseQueue::new(["hi"]).unwrap();
        let mut cycler = TypingCycler::new(queue, TypingTimings::default()).unwrap();
        assert_eq!(cycler.next_delay_ms(), 100);
        cycler.step();
        cycler.step();
        assert_eq!(cycler.prefix(), "hi");
        assert_eq!(cycler.next_delay_ms(), 2000);
        cycler.step();
        assert!(cycler.is_deleting());
        assert_eq!(cycler.next_delay_ms(), 50);
    }

    #[test]
    fn single_phrase_wraps_to_itself() {
        let mut cycler = fast(&["ok"]);
        for _ in 0..6 {
            cycler.step();
        }
        assert_eq!(cycler.index(), 0);
        assert_eq!(cycler.prefix(), "");
        assert!(!cycler.is_deleting());
    }

    #[test]
    fn multibyte_phrases_step_by_char() {
        let mut cycler = fast(&["día"]);
        cycler.step();
        cycler.step();
        assert_eq!(cycler.prefix(), "dí");
        cycler.step();
        assert_eq!(cycler.prefix(), "día");
    }

    #[test]
    fn empty_phrase_is_held_then_skipped() {
        let mut cycler = fast(&["", "x"]);
        assert!(!cycler.step()); // hold -> deleting
        assert!(!cycler.step()); // advance
        assert_eq!(cycler.index(), 1);
        assert!(cycler.step());
        assert_eq!(cycler.prefix(), "x");
    }

    #[test]
    fn empty_queue_is_a_config_error() {
        let err = PhraseQueue::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPhraseQueue));
    }

    #[test]
    fn zero_delete_speed_is_a_config_error() {
        let queue = PhraseQueue::new(["a"]).unwrap();
        let err = TypingCycler::new(
            queue,
            TypingTimings {
                delete_speed_ms: 0,
                ..TypingTimings::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroInterval {
                name: "delete_speed_ms"
            }
        ));
    }

    proptest! {
        #[test]
        fn prefix_never_exceeds_phrase(
            phrases in prop::collection::vec("[a-zé ]{0,8}", 1..5),
            steps in 0usize..200,
        ) {
            let queue = PhraseQueue::new(phrases).unwrap();
            let mut cycler = TypingCycler::new(queue, TypingTimings::default()).unwrap();
            for _ in 0..steps {
                cycler.step();
                let phrase = cycler.current_phrase();
                prop_assert!(cycler.prefix_len() <= phrase.chars().count());
                prop_assert!(phrase.starts_with(cycler.prefix()));
            }
        }
    }
}
