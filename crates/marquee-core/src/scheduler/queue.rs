use std::collections::BTreeMap;
use std::time::Duration;

use super::{Scheduler, Tick, TimerToken};

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub token: TimerToken,
    pub tick: Tick,
}

/// Virtual clock with a queue of pending timers
///
/// Time only moves through [`TimerQueue::pop_due`], which jumps `now` to the
/// deadline of the timer it returns. Anything scheduled from inside a fired
/// tick is therefore relative to that tick's own deadline, not to the end of
/// the window being advanced.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    /// Ordered by deadline, then by scheduling order
    pending: BTreeMap<(Duration, u64), Tick>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers waiting to fire
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Whether `token` is still waiting to fire
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.keys().any(|(_, id)| *id == token.id())
    }

    /// Pop the earliest timer due at or before `until`
    ///
    /// Moves `now` to that timer's deadline. Returns `None` once nothing more is
    /// due, leaving `now` untouched so the caller can settle it with
    /// [`TimerQueue::settle`].
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let (&(deadline, id), _) = self.pending.iter().next()?;
        if deadline > until {
            return None;
        }
        let tick = self.pending.remove(&(deadline, id))?;
        self.now = self.now.max(deadline);
        Some(Fired {
            token: TimerToken::new(id),
            tick,
        })
    }

    /// Move `now` forward to `until` once every due timer has been handled
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for TimerQueue {
    fn schedule_after(&mut self, delay: Duration, tick: Tick) -> TimerToken {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((self.now + delay, id), tick);
        TimerToken::new(id)
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|(_, id), _| *id != token.id());
    }
}
