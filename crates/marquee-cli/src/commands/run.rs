use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, KeyCode,
        KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Terminal,
};
use tracing::info;

use marquee_core::{AppConfig, MarqueeConfig};
use marquee_tui::{
    clock::FrameClock,
    event::{AppEvent, EventHandler},
    widgets::StatusBarWidget,
    MarqueeView, Theme,
};

pub async fn run(config: &AppConfig, marquee: MarqueeConfig, width: u16) -> Result<()> {
    info!(text_len = marquee.text_len(), width, "Starting marquee screen");

    let theme = Theme::default();
    let mut view = MarqueeView::new(marquee, theme.clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Marquee")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let frame_budget = Duration::from_millis(1000 / u64::from(config.ui.animation_fps.max(1)));

    let result = event_loop(&mut terminal, &mut view, &theme, &event_handler, frame_budget, width);

    view.detach();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &mut MarqueeView,
    theme: &Theme,
    events: &EventHandler,
    frame_budget: Duration,
    width: u16,
) -> Result<()> {
    let mut clock = FrameClock::new();

    loop {
        // Deliver every tick that came due since the last frame
        view.tick(clock.lap());

        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            let block = Block::default()
                .title(" marquee ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg0));
            let outer = centered_box(width, rows[0]);
            let inner = block.inner(outer);
            frame.render_widget(block, outer);

            view.render(frame, inner);
            StatusBarWidget::render(frame, rows[1], view, theme);
        })?;

        // The frame just drawn is the layout the controller measures against
        view.after_layout();

        // Wake up for the next tick, but not faster than the frame rate
        let timeout = view.poll_timeout(events.tick_rate()).max(frame_budget);
        if let Some(event) = events.next_within(timeout)? {
            if !handle_event(view, event) {
                break;
            }
        }
    }

    Ok(())
}

/// Apply one terminal event to the view, returning false on quit
fn handle_event(view: &mut MarqueeView, event: AppEvent) -> bool {
    match event {
        AppEvent::Key(key) if is_quit(&key) => return false,
        AppEvent::Mouse { column, row } => {
            view.handle_mouse(column, row);
        }
        // The box moves on resize, so the old pointer position means nothing
        AppEvent::PointerLost | AppEvent::Resize(_, _) => {
            view.pointer_lost();
        }
        AppEvent::Key(_) | AppEvent::Tick => {}
    }
    true
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// A bordered box `width` columns wide (plus borders), centered in `area`
fn centered_box(width: u16, area: Rect) -> Rect {
    let box_width = width.saturating_add(2).min(area.width);
    let box_height = 3u16.min(area.height);
    Rect::new(
        area.x + (area.width - box_width) / 2,
        area.y + (area.height - box_height) / 2,
        box_width,
        box_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    #[test]
    fn test_centered_box() {
        let area = Rect::new(0, 0, 40, 11);
        assert_eq!(centered_box(30, area), Rect::new(4, 4, 32, 3));

        // Never larger than the screen
        let small = Rect::new(0, 0, 10, 2);
        assert_eq!(centered_box(30, small), Rect::new(0, 0, 10, 2));
    }

    #[test]
    fn test_resize_drops_hover() {
        use marquee_core::Phase;
        use ratatui::backend::TestBackend;

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut view =
            MarqueeView::new(MarqueeConfig::with_text("Hello World"), Theme::default()).unwrap();
        let area = Rect::new(0, 0, 5, 1);
        terminal.draw(|frame| view.render(frame, area)).unwrap();
        view.after_layout();

        assert!(handle_event(&mut view, AppEvent::Mouse { column: 1, row: 0 }));
        assert!(view.controller().is_hovered());
        assert_eq!(view.controller().phase(), Phase::Running);

        assert!(handle_event(&mut view, AppEvent::Resize(40, 10)));
        assert!(!view.controller().is_hovered());
        assert_eq!(view.controller().phase(), Phase::Idle);
    }

    #[test]
    fn test_quit_event_ends_loop() {
        let mut view =
            MarqueeView::new(MarqueeConfig::with_text("Hello World"), Theme::default()).unwrap();
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!handle_event(&mut view, AppEvent::Key(quit)));
        assert!(handle_event(&mut view, AppEvent::Tick));
    }

    #[test]
    fn test_quit_keys() {
        let key = |code, modifiers| KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
