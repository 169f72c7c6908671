use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Idle poll timeout
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Poll for the next event, waiting at most `timeout`
    ///
    /// The loop shortens the timeout while a marquee timer is pending so ticks
    /// are not delayed by an idle poll.
    pub fn next_within(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved
                    | MouseEventKind::Drag(_)
                    | MouseEventKind::Down(_)
                    | MouseEventKind::Up(_) => Ok(Some(AppEvent::Mouse {
                        column: mouse.column,
                        row: mouse.row,
                    })),
                    _ => Ok(None),
                },
                Event::FocusLost => Ok(Some(AppEvent::PointerLost)),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse moved or clicked at a screen position
    Mouse { column: u16, row: u16 },
    /// Terminal lost focus, the pointer is gone
    PointerLost,
    /// Terminal was resized
    Resize(u16, u16),
    /// Poll timed out
    Tick,
}
