//! Single-threaded timer queue driven by a host-supplied monotonic clock.
//!
//! Hosts own the clock and the event loop; they ask for the next deadline,
//! sleep or poll until then, and drain due timers with [`Scheduler::pop_due`].
//! Every timer is owned by a [`TimerGuard`]; dropping the guard removes the
//! timer, so a view that goes away takes its scheduled callbacks with it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that came due, with the deadline it was scheduled for.
///
/// Re-arming relative to `deadline_ms` rather than the current time keeps
/// cadence stable when the host wakes up late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub deadline_ms: u64,
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    deadline_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Default)]
struct TimerQueue {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    fn arm(&mut self, deadline_ms: u64, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline_ms,
            period_ms,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Earliest due timer; ties go to the timer armed first.
    fn earliest_due(&self, now_ms: u64) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= now_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.id))
            .map(|(i, _)| i)
    }
}

/// Cloneable handle onto one timer queue.
///
/// Not `Send`: all timers of a page live on the thread that runs its event
/// loop.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<TimerQueue>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once, `delay_ms` after `now_ms`.
    pub fn set_timeout(&self, delay_ms: u64, now_ms: u64) -> TimerGuard {
        self.set_timeout_at(now_ms.saturating_add(delay_ms))
    }

    /// Fire once at an absolute deadline.
    pub fn set_timeout_at(&self, deadline_ms: u64) -> TimerGuard {
        let id = self.queue.borrow_mut().arm(deadline_ms, None);
        self.guard(id)
    }

    /// Fire every `period_ms`, first at `now_ms + period_ms`. A zero period
    /// is treated as one millisecond.
    pub fn set_interval(&self, period_ms: u64, now_ms: u64) -> TimerGuard {
        let period_ms = period_ms.max(1);
        let id = self
            .queue
            .borrow_mut()
            .arm(now_ms.saturating_add(period_ms), Some(period_ms));
        self.guard(id)
    }

    fn guard(&self, id: TimerId) -> TimerGuard {
        TimerGuard {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Remove and return the earliest timer due at `now_ms`.
    ///
    /// Intervals are re-armed one period after the deadline they fired for,
    /// so an interval that fell behind comes due again immediately and is
    /// returned once per missed period.
    pub fn pop_due(&self, now_ms: u64) -> Option<FiredTimer> {
        let mut queue = self.queue.borrow_mut();
        let index = queue.earliest_due(now_ms)?;
        let timer = &queue.timers[index];
        let fired = FiredTimer {
            id: timer.id,
            deadline_ms: timer.deadline_ms,
        };
        let period_ms = timer.period_ms;
        match period_ms {
            Some(period) => {
                queue.timers[index].deadline_ms = fired.deadline_ms.saturating_add(period);
            }
            None => {
                queue.timers.swap_remove(index);
            }
        }
        Some(fired)
    }

    /// Deadline of the next timer to fire, if any are armed.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue
            .borrow()
            .timers
            .iter()
            .map(|t| t.deadline_ms)
            .min()
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.queue.borrow().timers.len()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.queue.borrow().timers.iter().any(|t| t.id == id)
    }
}

/// Owns one armed timer. Dropping the guard cancels it.
#[derive(Debug)]
#[must_use = "dropping a TimerGuard cancels its timer"]
pub struct TimerGuard {
    id: TimerId,
    queue: Weak<RefCell<TimerQueue>>,
}

impl TimerGuard {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancel now instead of at end of scope.
    pub fn cancel(self) {}
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        let Some(queue) = self.queue.upgrade() else {
            return;
        };
        match queue.try_borrow_mut() {
            Ok(mut queue) => {
                if queue.cancel(self.id) {
                    trace!(timer = self.id.0, "timer cancelled");
                }
            }
            Err(_) => warn!(timer = self.id.0, "timer queue busy; cancellation skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &Scheduler, now_ms: u64) -> Vec<FiredTimer> {
        std::iter::from_fn(|| scheduler.pop_due(now_ms)).collect()
    }

    #[test]
    fn timeout_fires_once() {
        let scheduler = Scheduler::new();
        let guard = scheduler.set_timeout(100, 0);
        assert_eq!(scheduler.next_deadline(), Some(100));
        assert!(drain(&scheduler, 99).is_empty());

        let fired = drain(&scheduler, 100);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, guard.id());
        assert_eq!(fired[0].deadline_ms, 100);
        assert!(drain(&scheduler, 1_000).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn interval_catches_up_once_per_period() {
        let scheduler = Scheduler::new();
        let _blink = scheduler.set_interval(500, 0);
        let fired = drain(&scheduler, 1_600);
        let deadlines: Vec<u64> = fired.iter().map(|f| f.deadline_ms).collect();
        assert_eq!(deadlines, vec![500, 1_000, 1_500]);
        assert_eq!(scheduler.next_deadline(), Some(2_000));
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let scheduler = Scheduler::new();
        let late = scheduler.set_timeout(300, 0);
        let early = scheduler.set_timeout(100, 0);
        let tie = scheduler.set_timeout(100, 0);
        let order: Vec<TimerId> = drain(&scheduler, 300).iter().map(|f| f.id).collect();
        assert_eq!(order, vec![early.id(), tie.id(), late.id()]);
    }

    #[test]
    fn dropping_guard_cancels() {
        let scheduler = Scheduler::new();
        let guard = scheduler.set_interval(50, 0);
        let id = guard.id();
        assert!(scheduler.is_armed(id));
        drop(guard);
        assert!(!scheduler.is_armed(id));
        assert!(drain(&scheduler, 10_000).is_empty());
    }

    #[test]
    fn guard_outliving_scheduler_is_harmless() {
        let guard = {
            let scheduler = Scheduler::new();
            scheduler.set_timeout(10, 0)
        };
        guard.cancel();
    }

    #[test]
    fn unwinding_releases_timers() {
        let scheduler = Scheduler::new();
        let inner = scheduler.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = inner.set_interval(500, 0);
            panic!("view torn down abnormally");
        }));
        assert!(result.is_err());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn zero_period_interval_still_advances() {
        let scheduler = Scheduler::new();
        let _g = scheduler.set_interval(0, 0);
        assert_eq!(drain(&scheduler, 3).len(), 3);
    }
}
