use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use marquee_core::RenderDescription;

/// Paints one marquee line, shifted left by the description's offset
///
/// The terminal host measures in columns, so one pixel of offset is one
/// column. Only the first row of the area is used.
pub struct MarqueeWidget<'a> {
    desc: &'a RenderDescription,
    style: Style,
}

impl<'a> MarqueeWidget<'a> {
    pub fn new(desc: &'a RenderDescription) -> Self {
        Self {
            desc,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for MarqueeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let row = Rect { height: 1, ..area };
        buf.set_style(row, self.style);

        let window = visible_window(
            &self.desc.text,
            self.desc.offset as usize,
            area.width as usize,
        );
        buf.set_stringn(area.x, area.y, window, area.width as usize, self.style);
    }
}

/// Width of `text` in terminal columns
pub fn display_width(text: &str) -> u32 {
    u32::try_from(text.width()).unwrap_or(u32::MAX)
}

/// The part of `text` visible through a `width`-column window starting
/// `offset` columns in
///
/// A wide character cut by either edge is replaced by spaces for the columns
/// it would have covered, so the result never exceeds `width` columns.
pub fn visible_window(text: &str, offset: usize, width: usize) -> String {
    let end = offset + width;
    let mut out = String::new();
    let mut column = 0usize;

    for ch in text.chars() {
        if column >= end {
            break;
        }
        let w = match ch.width() {
            Some(w) => w,
            // Control characters take no space and are not drawn
            None => continue,
        };
        let start = column;
        column += w;

        if w == 0 {
            // Combining marks stick to a visible base character
            if start > offset && start <= end && !out.is_empty() {
                out.push(ch);
            }
            continue;
        }
        if column <= offset {
            continue;
        }
        if start < offset || column > end {
            let visible = column.min(end) - start.max(offset);
            out.extend(std::iter::repeat(' ').take(visible));
            continue;
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_window_ascii() {
        assert_eq!(visible_window("Hello World", 0, 5), "Hello");
        assert_eq!(visible_window("Hello World", 6, 5), "World");
        assert_eq!(visible_window("Hello World", 8, 5), "rld");
        assert_eq!(visible_window("Hello", 10, 5), "");
    }

    #[test]
    fn test_visible_window_wide_chars() {
        // Each glyph covers two columns
        assert_eq!(visible_window("日本語", 0, 4), "日本");
        assert_eq!(visible_window("日本語", 1, 4), " 本 ");
        assert_eq!(visible_window("日本語", 2, 3), "本 ");
        assert_eq!(display_width(&visible_window("日本語", 1, 4)), 4);
    }

    #[test]
    fn test_visible_window_combining() {
        let text = "e\u{301}tude";
        assert_eq!(visible_window(text, 0, 2), "e\u{301}t");
        assert_eq!(visible_window(text, 1, 2), "tu");
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("Hello World"), 11);
        assert_eq!(display_width("日本語"), 6);
    }

    #[test]
    fn test_render_shifted() {
        let desc = RenderDescription::scrolling("Hello World", "", 3);
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        MarqueeWidget::new(&desc).render(area, &mut buf);
        assert_eq!(buf, Buffer::with_lines(["lo Wor"]));
    }

    #[test]
    fn test_render_stays_inside_area() {
        let desc = RenderDescription::fitting("Hi", "");
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        MarqueeWidget::new(&desc).render(Rect::new(1, 1, 2, 1), &mut buf);
        assert_eq!(buf, Buffer::with_lines(["    ", " Hi "]));
    }
}
