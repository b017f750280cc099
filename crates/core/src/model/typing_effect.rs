use folio_protocol::TypedText;

use crate::config::TypingConfig;
use crate::error::ConfigError;
use crate::timers::{FiredTimer, Scheduler, TimerGuard};

use super::typing::TypingCycler;

/// A [`TypingCycler`] mounted on a [`Scheduler`], plus the blinking cursor.
///
/// Mounting arms two timers: the step timer, re-armed after every transition
/// with the cycler's next delay, and a fixed-period blink interval that runs
/// independently of the typing state. Both are released when the effect is
/// dropped.
#[derive(Debug)]
pub struct TypingEffect {
    cycler: TypingCycler,
    cursor_visible: bool,
    scheduler: Scheduler,
    step_timer: TimerGuard,
    blink_timer: TimerGuard,
}

impl TypingEffect {
    pub fn mount(
        scheduler: &Scheduler,
        cycler: TypingCycler,
        blink_period_ms: u64,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        if blink_period_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "cursor_blink_ms",
            });
        }
        let step_timer = scheduler.set_timeout(cycler.next_delay_ms(), now_ms);
        let blink_timer = scheduler.set_interval(blink_period_ms, now_ms);
        Ok(Self {
            cycler,
            cursor_visible: true,
            scheduler: scheduler.clone(),
            step_timer,
            blink_timer,
        })
    }

    pub fn from_config(
        scheduler: &Scheduler,
        config: &TypingConfig,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        let cycler = TypingCycler::new(config.phrase_queue()?, config.timings())?;
        Self::mount(scheduler, cycler, config.cursor_blink_ms, now_ms)
    }

    /// Whether `fired` belongs to this effect.
    pub fn owns(&self, fired: &FiredTimer) -> bool {
        fired.id == self.step_timer.id() || fired.id == self.blink_timer.id()
    }

    /// Handle one of this effect's timers. Returns whether the display
    /// changed.
    pub fn on_timer(&mut self, fired: FiredTimer) -> bool {
        if fired.id == self.step_timer.id() {
            let changed = self.cycler.step();
            let next = fired.deadline_ms.saturating_add(self.cycler.next_delay_ms());
            self.step_timer = self.scheduler.set_timeout_at(next);
            changed
        } else if fired.id == self.blink_timer.id() {
            self.cursor_visible = !self.cursor_visible;
            true
        } else {
            false
        }
    }

    pub fn display(&self) -> TypedText {
        TypedText {
            text: self.cycler.prefix().to_owned(),
            cursor_visible: self.cursor_visible,
        }
    }

    pub fn cycler(&self) -> &TypingCycler {
        &self.cycler
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::typing::{PhraseQueue, TypingTimings};

    fn mount(scheduler: &Scheduler, phrases: &[&str], timings: TypingTimings) -> TypingEffect {
        let queue = PhraseQueue::new(phrases.iter().copied()).unwrap();
        let cycler = TypingCycler::new(queue, timings).unwrap();
        TypingEffect::mount(scheduler, cycler, 500, 0).unwrap()
    }

    fn run_until(scheduler: &Scheduler, effect: &mut TypingEffect, now_ms: u64) {
        while let Some(fired) = scheduler.pop_due(now_ms) {
            effect.on_timer(fired);
        }
    }

    #[test]
    fn types_on_schedule() {
        let scheduler = Scheduler::new();
        let mut effect = mount(&scheduler, &["Rust"], TypingTimings::default());
        run_until(&scheduler, &mut effect, 99);
        assert_eq!(effect.display().text, "");
        run_until(&scheduler, &mut effect, 100);
        assert_eq!(effect.display().text, "R");
        run_until(&scheduler, &mut effect, 400);
        assert_eq!(effect.display().text, "Rust");
    }

    #[test]
    fn holds_full_phrase_before_deleting() {
        let scheduler = Scheduler::new();
        let mut effect = mount(&scheduler, &["ab"], TypingTimings::default());
        // typed at 100, 200; switches to deleting at 2200; first delete at 2250
        run_until(&scheduler, &mut effect, 2_249);
        assert_eq!(effect.display().text, "ab");
        assert!(effect.cycler().is_deleting());
        run_until(&scheduler, &mut effect, 2_250);
        assert_eq!(effect.display().text, "a");
    }

    #[test]
    fn cursor_toggles_every_period_regardless_of_typing() {
        let scheduler = Scheduler::new();
        let mut effect = mount(&scheduler, &["abc"], TypingTimings::default());
        let mut toggles = Vec::new();
        let mut last = effect.cursor_visible();
        for now in 0..=3_000u64 {
            run_until(&scheduler, &mut effect, now);
            if effect.cursor_visible() != last {
                toggles.push(now);
                last = effect.cursor_visible();
            }
        }
        assert_eq!(toggles, vec![500, 1_000, 1_500, 2_000, 2_500, 3_000]);
    }

    #[test]
    fn late_host_catches_up_deterministically() {
        let scheduler = Scheduler::new();
        let mut effect = mount(&scheduler, &["abc"], TypingTimings::default());
        run_until(&scheduler, &mut effect, 250);
        assert_eq!(effect.display().text, "ab");
        assert_eq!(scheduler.next_deadline(), Some(300));
    }

    #[test]
    fn drop_releases_both_timers() {
        let scheduler = Scheduler::new();
        let effect = mount(&scheduler, &["abc"], TypingTimings::default());
        assert_eq!(scheduler.pending(), 2);
        drop(effect);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn foreign_timers_are_ignored() {
        let scheduler = Scheduler::new();
        let mut effect = mount(&scheduler, &["abc"], TypingTimings::default());
        let other = scheduler.set_timeout(10, 0);
        let fired = scheduler.pop_due(10).unwrap();
        assert_eq!(fired.id, other.id());
        assert!(!effect.owns(&fired));
        assert!(!effect.on_timer(fired));
    }

    #[test]
    fn from_config_rejects_empty_phrases() {
        let scheduler = Scheduler::new();
        let config = TypingConfig {
            phrases: Vec::new(),
            ..TypingConfig::default()
        };
        let err = TypingEffect::from_config(&scheduler, &config, 0).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPhraseQueue));
        assert_eq!(scheduler.pending(), 0);
    }
}
