//! What the host should draw for a marquee

use serde::{Deserialize, Serialize};

/// Class every marquee container carries
pub const BASE_CLASS: &str = "ui-marquee";

/// Render output of the controller
///
/// A container box with a class list wrapping a single text node. The text node
/// is shifted left by `offset` pixels and carries the raw text as its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderDescription {
    /// Full class list of the container
    pub class_name: String,
    /// Whether pointer enter/leave should be bound to the container
    pub interactive: bool,
    pub text: String,
    /// Accessible title, always the raw text
    pub title: String,
    /// Horizontal shift of the text node
    pub offset: u32,
}

impl RenderDescription {
    /// The box shown when the text fits: no motion, no pointer bindings
    pub fn fitting(text: &str, extra_class: &str) -> Self {
        Self {
            class_name: class_list(extra_class),
            interactive: false,
            text: text.to_string(),
            title: text.to_string(),
            offset: 0,
        }
    }

    /// The box shown when the text overflows
    pub fn scrolling(text: &str, extra_class: &str, offset: u32) -> Self {
        Self {
            class_name: class_list(extra_class),
            interactive: true,
            text: text.to_string(),
            title: text.to_string(),
            offset,
        }
    }

    /// Signed translation to apply on the x axis
    #[inline]
    pub fn translate_x(&self) -> i64 {
        -i64::from(self.offset)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn class_list(extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        BASE_CLASS.to_string()
    } else {
        format!("{} {}", BASE_CLASS, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_box() {
        let desc = RenderDescription::fitting("Hi", "title");
        assert_eq!(desc.class_name, "ui-marquee title");
        assert!(!desc.interactive);
        assert_eq!(desc.title, "Hi");
        assert_eq!(desc.translate_x(), 0);
    }

    #[test]
    fn test_scrolling_box() {
        let desc = RenderDescription::scrolling("Hello World", "", 12);
        assert_eq!(desc.class_name, "ui-marquee");
        assert!(desc.interactive);
        assert_eq!(desc.translate_x(), -12);
    }

    #[test]
    fn test_json_fields() {
        let desc = RenderDescription::scrolling("Hello", "x", 3);
        let value: serde_json::Value = serde_json::from_str(&desc.to_json().unwrap()).unwrap();
        assert_eq!(value["offset"], 3);
        assert_eq!(value["interactive"], true);
        assert_eq!(value["title"], "Hello");
    }
}
