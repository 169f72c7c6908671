//! Timer scheduling for the marquee controller
//!
//! The controller never sleeps or spawns. It asks a [`Scheduler`] to deliver a
//! [`Tick`] after a delay and keeps the returned [`TimerToken`] so the timer
//! can be cancelled. Hosts either implement [`Scheduler`] on top of their own
//! event loop or use [`TimerQueue`], a virtual clock that is advanced
//! explicitly (by wall time in the terminal host, by hand in tests).

mod queue;

pub use queue::{Fired, TimerQueue};

use std::fmt;
use std::time::Duration;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Move the text one pixel further
    Advance,
    /// Apply a loop wrap that was held back by the trailing delay
    ApplyWrap,
}

/// Handle for a scheduled timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id, only meaningful for logging
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Capability to run a tick after a delay
///
/// Cancelling must be final: once `cancel` returns, the tick for that token is
/// never delivered. Cancelling an unknown or already fired token is a no-op.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration, tick: Tick) -> TimerToken;

    fn cancel(&mut self, token: TimerToken);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule_after(&mut self, delay: Duration, tick: Tick) -> TimerToken {
        (**self).schedule_after(delay, tick)
    }

    fn cancel(&mut self, token: TimerToken) {
        (**self).cancel(token)
    }
}
