//! Wall-clock source for driving the virtual timer queue
//!
//! The terminal loop wakes up on its own schedule (key presses, mouse moves,
//! poll timeouts). Each wake-up asks the clock how much real time went by and
//! feeds that to the marquee, so ticks land on time no matter how the loop was
//! woken.

use std::time::{Duration, Instant};

/// Measures elapsed time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous call (or since creation)
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// How long the event loop may sleep before the next timer is due
///
/// Never longer than `idle`, never negative.
#[inline]
pub fn poll_timeout(now: Duration, next_deadline: Option<Duration>, idle: Duration) -> Duration {
    match next_deadline {
        Some(deadline) => deadline.saturating_sub(now).min(idle),
        None => idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_poll_timeout() {
        assert_eq!(poll_timeout(ms(100), None, ms(250)), ms(250));
        assert_eq!(poll_timeout(ms(100), Some(ms(120)), ms(250)), ms(20));
        assert_eq!(poll_timeout(ms(100), Some(ms(900)), ms(250)), ms(250));
        // Overdue timers should be handled right away
        assert_eq!(poll_timeout(ms(100), Some(ms(80)), ms(250)), Duration::ZERO);
    }

    #[test]
    fn test_lap_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.lap();
        let b = clock.lap();
        assert!(a >= Duration::ZERO);
        assert!(b >= Duration::ZERO);
    }
}
