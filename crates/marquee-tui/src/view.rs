//! A marquee hosted in a terminal frame
//!
//! Ties the controller to ratatui: the area it is drawn into becomes the
//! container width, the text's column count becomes the text width, mouse
//! positions become pointer enter/leave, and wall time drives the timer queue.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};
use tracing::debug;

use marquee_core::{MarqueeConfig, MarqueeController, SharedWidth, TimerQueue};

use crate::clock::poll_timeout;
use crate::hover::{HoverTracker, PointerEvent};
use crate::theme::Theme;
use crate::widgets::{display_width, MarqueeWidget};

#[derive(Debug)]
pub struct MarqueeView {
    controller: MarqueeController<TimerQueue>,
    container: SharedWidth,
    text: SharedWidth,
    hover: HoverTracker,
    /// Area of the last frame, `None` until first drawn
    area: Option<Rect>,
    attached: bool,
    theme: Theme,
}

impl MarqueeView {
    pub fn new(config: MarqueeConfig, theme: Theme) -> marquee_core::Result<Self> {
        let container = SharedWidth::new();
        let text = SharedWidth::with_width(display_width(&config.text));
        let controller =
            MarqueeController::new(config, TimerQueue::new(), container.clone(), text.clone())?;

        Ok(Self {
            controller,
            container,
            text,
            hover: HoverTracker::new(),
            area: None,
            attached: false,
            theme,
        })
    }

    pub fn controller(&self) -> &MarqueeController<TimerQueue> {
        &self.controller
    }

    /// Area the marquee was last drawn into
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Draw the current state into `area`
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.area = Some(area);
        self.container.set(u32::from(area.width));

        let desc = self.controller.render();
        let mut style = Style::default().fg(self.theme.fg0).bg(self.theme.bg1);
        if desc.interactive && self.controller.is_hovered() {
            style = style.fg(self.theme.hover).add_modifier(Modifier::BOLD);
        }

        frame.render_widget(MarqueeWidget::new(&desc).style(style), area);
    }

    /// Run after each frame so the controller sees the new layout
    ///
    /// The first call attaches the controller. Returns whether anything the
    /// next frame shows changed.
    pub fn after_layout(&mut self) -> bool {
        if !self.attached {
            self.attached = true;
            debug!(area = ?self.area, "Attaching marquee");
            self.controller.on_attach();
            return true;
        }
        self.controller.measure()
    }

    /// Feed a mouse position
    pub fn handle_mouse(&mut self, column: u16, row: u16) -> Option<PointerEvent> {
        let area = self.area?;
        let event = self.hover.update(column, row, area)?;
        self.dispatch(event);
        Some(event)
    }

    /// The pointer can no longer be over the box (focus lost, resize)
    pub fn pointer_lost(&mut self) -> Option<PointerEvent> {
        let event = self.hover.clear()?;
        self.dispatch(event);
        Some(event)
    }

    /// Advance the timers by `elapsed` wall time, returning ticks delivered
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        self.controller.advance(elapsed)
    }

    /// How long the loop may wait before the next tick is due
    pub fn poll_timeout(&self, idle: Duration) -> Duration {
        poll_timeout(
            self.controller.now(),
            self.controller.scheduler().next_deadline(),
            idle,
        )
    }

    /// Swap in a new configuration
    pub fn set_config(&mut self, config: MarqueeConfig) -> marquee_core::Result<()> {
        config.validate()?;
        self.text.set(display_width(&config.text));
        self.controller.on_config_change(config)
    }

    /// Stop everything before the view is dropped
    pub fn detach(&mut self) {
        self.controller.on_detach();
        self.container.clear();
        self.attached = false;
    }

    fn dispatch(&mut self, event: PointerEvent) {
        debug!(?event, "Marquee pointer event");
        match event {
            PointerEvent::Enter => self.controller.pointer_enter(),
            PointerEvent::Leave => self.controller.pointer_leave(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::Phase;
    use ratatui::{backend::TestBackend, Terminal};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn draw(terminal: &mut Terminal<TestBackend>, view: &mut MarqueeView, area: Rect) {
        terminal.draw(|frame| view.render(frame, area)).unwrap();
        view.after_layout();
    }

    #[test]
    fn test_measures_from_layout() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut view =
            MarqueeView::new(MarqueeConfig::with_text("Hello World"), Theme::default()).unwrap();

        draw(&mut terminal, &mut view, Rect::new(0, 0, 5, 1));
        assert_eq!(view.controller().overflow_width(), 6);

        draw(&mut terminal, &mut view, Rect::new(0, 0, 20, 1));
        assert_eq!(view.controller().overflow_width(), -9);
    }

    #[test]
    fn test_mouse_hover_scrolls() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut view =
            MarqueeView::new(MarqueeConfig::with_text("Hello World"), Theme::default()).unwrap();
        let area = Rect::new(2, 1, 5, 1);
        draw(&mut terminal, &mut view, area);

        assert_eq!(view.handle_mouse(0, 0), None);
        assert_eq!(view.handle_mouse(3, 1), Some(PointerEvent::Enter));
        assert_eq!(view.controller().phase(), Phase::Running);

        view.tick(ms(40));
        assert_eq!(view.controller().animated_width(), 3);

        draw(&mut terminal, &mut view, area);
        let buffer = terminal.backend().buffer();
        let shown: String = (2..7)
            .filter_map(|x| buffer.cell((x, 1)).map(|cell| cell.symbol().to_string()))
            .collect();
        assert_eq!(shown, "lo Wo");

        assert_eq!(view.pointer_lost(), Some(PointerEvent::Leave));
        assert_eq!(view.controller().animated_width(), 0);
    }

    #[test]
    fn test_poll_timeout_follows_next_tick() {
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        let config = MarqueeConfig {
            text: "Hello World".to_string(),
            hover_to_stop: true,
            leading_ms: 300,
            ..Default::default()
        };
        let mut view = MarqueeView::new(config, Theme::default()).unwrap();
        assert_eq!(view.poll_timeout(ms(100)), ms(100));

        draw(&mut terminal, &mut view, Rect::new(0, 0, 5, 1));
        assert_eq!(view.poll_timeout(ms(1_000)), ms(300));

        view.tick(ms(300));
        assert_eq!(view.poll_timeout(ms(1_000)), ms(20));
    }

    #[test]
    fn test_set_config_rewinds_on_new_text() {
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        let mut view =
            MarqueeView::new(MarqueeConfig::with_text("Hello World"), Theme::default()).unwrap();
        draw(&mut terminal, &mut view, Rect::new(0, 0, 5, 1));
        view.handle_mouse(1, 0);
        view.tick(ms(60));
        assert!(view.controller().animated_width() > 0);

        view.set_config(MarqueeConfig::with_text("Goodbye, World")).unwrap();
        assert_eq!(view.controller().animated_width(), 0);
        assert_eq!(view.controller().overflow_width(), 9);

        let bad = MarqueeConfig {
            speed: 0.0,
            ..MarqueeConfig::with_text("x")
        };
        assert!(view.set_config(bad).is_err());
        assert_eq!(view.controller().config().text, "Goodbye, World");
    }

    #[test]
    fn test_detach_stops_timer() {
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        let config = MarqueeConfig {
            text: "Hello World".to_string(),
            hover_to_stop: true,
            ..Default::default()
        };
        let mut view = MarqueeView::new(config, Theme::default()).unwrap();
        draw(&mut terminal, &mut view, Rect::new(0, 0, 5, 1));
        assert!(view.controller().is_animating());

        view.detach();
        assert!(!view.controller().is_animating());
        assert_eq!(view.tick(ms(1_000)), 0);
    }
}
