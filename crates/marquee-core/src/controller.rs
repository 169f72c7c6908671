//! Marquee animation controller
//!
//! Owns the overflow measurement and the tick state machine of one marquee
//! instance. Hosts drive it through the lifecycle calls (`on_attach`,
//! `on_config_change`, `on_detach`), the pointer calls and timer deliveries,
//! and read back a [`RenderDescription`] to draw.
//!
//! ```text
//!            start                tick < overflow
//!   Idle ──────────────▶ Running ◀───────────────┐
//!    ▲                    │  │ └─────────────────┘
//!    │   loop && trailing │  │ !loop
//!    │                    ▼  ▼
//!    └── WrappingDelay ◀─┘  Stopped
//! ```

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::{MarqueeConfig, MarqueeConfigExt};
use crate::measure::{Measurable, Measurement};
use crate::render::RenderDescription;
use crate::scheduler::{Scheduler, Tick, TimerQueue, TimerToken};
use crate::Result;

/// Where the animation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No timer, text at its start position
    Idle,
    /// An advance tick is pending
    Running,
    /// Holding at the end of a pass before wrapping back to 0
    WrappingDelay,
    /// Timer cancelled part way through a pass
    Paused,
    /// A non-looping pass completed
    Stopped,
}

/// Animation state machine for one marquee instance
pub struct MarqueeController<S: Scheduler = TimerQueue> {
    config: MarqueeConfig,
    scheduler: S,
    container: Box<dyn Measurable>,
    text: Box<dyn Measurable>,
    /// Last measured `text_width - container_width`
    overflow_width: i64,
    /// Current leftward shift of the text
    animated_width: u32,
    /// The single in-flight timer, if any
    pending: Option<(TimerToken, Tick)>,
    hovered: bool,
    /// Set when a non-looping pass ran out
    finished: bool,
    detached: bool,
}

impl<S: Scheduler> MarqueeController<S> {
    /// Create a controller for `config`, measuring through the given handles
    ///
    /// Fails when the configured speed cannot produce a tick interval.
    pub fn new(
        config: MarqueeConfig,
        scheduler: S,
        container: impl Measurable + 'static,
        text: impl Measurable + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler,
            container: Box::new(container),
            text: Box::new(text),
            overflow_width: 0,
            animated_width: 0,
            pending: None,
            hovered: false,
            finished: false,
            detached: false,
        })
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[inline]
    pub fn animated_width(&self) -> u32 {
        self.animated_width
    }

    #[inline]
    pub fn overflow_width(&self) -> i64 {
        self.overflow_width
    }

    /// Whether a timer is in flight
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Token of the in-flight timer
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending.map(|(token, _)| token)
    }

    /// Whether the text overflows enough to bind pointer events
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.overflow_width >= 0
    }

    pub fn phase(&self) -> Phase {
        match self.pending {
            Some((_, Tick::Advance)) => Phase::Running,
            Some((_, Tick::ApplyWrap)) => Phase::WrappingDelay,
            None if self.finished => Phase::Stopped,
            None if self.animated_width == 0 => Phase::Idle,
            None => Phase::Paused,
        }
    }

    /// First layout pass is done
    pub fn on_attach(&mut self) {
        self.detached = false;
        self.measure();
        self.autoplay();
    }

    /// Apply a new configuration
    ///
    /// A change in text length cancels the animation and rewinds it. An invalid
    /// configuration is rejected and leaves the controller untouched.
    pub fn on_config_change(&mut self, config: MarqueeConfig) -> Result<()> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejected marquee config change");
            return Err(e);
        }

        let text_changed = config.text_len() != self.config.text_len();
        let mode_changed = config.looping != self.config.looping
            || config.hover_to_stop != self.config.hover_to_stop;
        self.config = config;

        if mode_changed {
            // A finished pass may have more to show under the new mode
            self.finished = false;
        }

        if text_changed {
            debug!(
                text_len = self.config.text_len(),
                "Marquee text length changed, rewinding"
            );
            self.reset();
        }

        self.measure();
        self.autoplay();
        Ok(())
    }

    /// Torn down by the host; no further ticks are processed
    pub fn on_detach(&mut self) {
        self.stop_animation();
        self.hovered = false;
        self.detached = true;
    }

    /// Re-read both widths and update the overflow if it moved
    ///
    /// Skipped when either node has not been laid out yet. Returns whether the
    /// overflow changed.
    pub fn measure(&mut self) -> bool {
        let Some(measurement) = Measurement::read(&*self.container, &*self.text) else {
            trace!("Marquee nodes not laid out yet, keeping previous measurement");
            return false;
        };

        let overflow_width = measurement.overflow_width();
        if overflow_width == self.overflow_width {
            return false;
        }

        debug!(
            container_width = measurement.container_width,
            text_width = measurement.text_width,
            overflow_width,
            previous = self.overflow_width,
            "Marquee overflow changed"
        );
        self.overflow_width = overflow_width;
        self.finished = false;

        if overflow_width < 0 {
            // Fitting text renders statically, without pointer bindings
            self.reset();
            self.hovered = false;
        } else {
            self.autoplay();
        }
        true
    }

    /// (Re)start ticking from the current position
    ///
    /// Any pending tick is cancelled first, so at most one timer is in flight.
    /// A fresh pass (offset 0) waits the leading delay, a resumed one waits a
    /// regular interval.
    pub fn start_animation(&mut self) {
        if self.detached {
            trace!("Ignoring start on detached marquee");
            return;
        }
        self.stop_animation();
        self.finished = false;

        let delay = if self.animated_width == 0 {
            self.config.leading()
        } else {
            self.config.tick_interval()
        };
        debug!(
            delay_ms = delay.as_millis(),
            animated_width = self.animated_width,
            "Starting marquee animation"
        );
        self.schedule(delay, Tick::Advance);
    }

    /// Cancel the in-flight tick, keeping the current offset
    pub fn stop_animation(&mut self) {
        if let Some((token, _)) = self.pending.take() {
            trace!(%token, "Cancelling marquee timer");
            self.scheduler.cancel(token);
        }
    }

    /// Cancel and rewind to the start position
    pub fn reset(&mut self) {
        self.stop_animation();
        self.animated_width = 0;
        self.finished = false;
    }

    /// Pointer moved onto the box
    pub fn pointer_enter(&mut self) {
        if !self.is_interactive() {
            return;
        }
        self.hovered = true;

        if self.config.hover_to_stop {
            self.stop_animation();
        } else if self.overflow_width > 0 {
            self.start_animation();
        }
    }

    /// Pointer left the box
    pub fn pointer_leave(&mut self) {
        if !self.is_interactive() {
            return;
        }
        self.hovered = false;

        if self.config.hover_to_stop && self.overflow_width > 0 {
            self.start_animation();
        } else {
            self.reset();
        }
    }

    /// Deliver a timer that came due
    ///
    /// Returns whether the rendered offset changed. Tokens other than the
    /// in-flight one are ignored.
    pub fn on_timer(&mut self, token: TimerToken, tick: Tick) -> bool {
        match self.pending {
            Some((pending, _)) if pending == token => self.pending = None,
            _ => {
                trace!(%token, "Ignoring stale marquee timer");
                return false;
            }
        }

        let changed = match tick {
            Tick::Advance => self.advance_tick(),
            Tick::ApplyWrap => {
                self.animated_width = 0;
                self.schedule(self.config.tick_interval(), Tick::Advance);
                true
            }
        };

        if changed {
            self.measure();
        }
        changed
    }

    /// What the host should draw right now
    pub fn render(&self) -> RenderDescription {
        if self.is_interactive() {
            RenderDescription::scrolling(
                &self.config.text,
                &self.config.class_name,
                self.animated_width,
            )
        } else {
            RenderDescription::fitting(&self.config.text, &self.config.class_name)
        }
    }

    fn advance_tick(&mut self) -> bool {
        let next = i64::from(self.animated_width) + 1;

        if next <= self.overflow_width {
            self.animated_width = self.animated_width.saturating_add(1);
            trace!(animated_width = self.animated_width, "Marquee tick");
            self.schedule(self.config.tick_interval(), Tick::Advance);
            return true;
        }

        if !self.config.looping {
            debug!(
                animated_width = self.animated_width,
                "Marquee pass complete"
            );
            self.finished = true;
            return false;
        }

        if self.config.trailing_ms > 0 {
            debug!(
                trailing_ms = self.config.trailing_ms,
                "Marquee pass complete, holding before wrap"
            );
            self.schedule(self.config.trailing(), Tick::ApplyWrap);
            return false;
        }

        trace!("Marquee wrapped");
        self.animated_width = 0;
        self.schedule(self.config.tick_interval(), Tick::Advance);
        true
    }

    /// Start ticking when hover-to-stop mode wants the text moving on its own
    fn autoplay(&mut self) {
        if self.config.hover_to_stop
            && !self.hovered
            && !self.detached
            && !self.finished
            && self.pending.is_none()
            && self.overflow_width > 0
        {
            self.start_animation();
        }
    }

    fn schedule(&mut self, delay: Duration, tick: Tick) {
        let token = self.scheduler.schedule_after(delay, tick);
        self.pending = Some((token, tick));
    }
}

impl MarqueeController<TimerQueue> {
    /// Run the virtual clock forward, delivering every timer that comes due
    ///
    /// Ticks scheduled while advancing fire within the same call when their
    /// deadline falls inside the window. Returns the number of deliveries.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.scheduler.now() + by;
        let mut delivered = 0;
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.on_timer(fired.token, fired.tick);
            delivered += 1;
        }
        self.scheduler.settle(until);
        delivered
    }

    /// Current virtual time of the underlying queue
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for MarqueeController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarqueeController")
            .field("config", &self.config)
            .field("scheduler", &self.scheduler)
            .field("overflow_width", &self.overflow_width)
            .field("animated_width", &self.animated_width)
            .field("pending", &self.pending)
            .field("hovered", &self.hovered)
            .field("finished", &self.finished)
            .field("detached", &self.detached)
            .finish()
    }
}
