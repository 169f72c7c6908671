use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use marquee_core::Phase;

use crate::theme::Theme;
use crate::view::MarqueeView;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, view: &MarqueeView, theme: &Theme) {
        let controller = view.controller();

        let phase_str = match controller.phase() {
            Phase::Idle => "IDLE",
            Phase::Running => "RUNNING",
            Phase::WrappingDelay => "TRAILING",
            Phase::Paused => "PAUSED",
            Phase::Stopped => "DONE",
        };

        let status_text = if controller.is_interactive() {
            format!(
                " {} | offset {}/{} | {}",
                phase_str,
                controller.animated_width(),
                controller.overflow_width(),
                if controller.is_hovered() { "hover" } else { "-" }
            )
        } else {
            " FITS | no scrolling needed".to_string()
        };

        let help_hint = " q:quit  hover the box to toggle ";
        let padding = padding_len(area.width, &status_text, help_hint);

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Blank columns needed between `left` and `right` to fill `width`
fn padding_len(width: u16, left: &str, right: &str) -> usize {
    usize::from(width).saturating_sub(left.width() + right.width())
}
