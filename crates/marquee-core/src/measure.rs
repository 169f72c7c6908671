//! Width queries against the host's layout
//!
//! The controller holds two opaque handles, one for the container box and one
//! for the text node, and asks each for its rendered width after every attach
//! and update. A handle returns `None` while the host has not laid it out yet.

use std::cell::Cell;
use std::rc::Rc;

/// Something the host has laid out and can report a width for
pub trait Measurable {
    /// Rendered width in pixels (columns for a terminal host)
    fn rendered_width(&self) -> Option<u32>;
}

impl<T: Measurable + ?Sized> Measurable for Rc<T> {
    fn rendered_width(&self) -> Option<u32> {
        (**self).rendered_width()
    }
}

impl<T: Measurable + ?Sized> Measurable for Box<T> {
    fn rendered_width(&self) -> Option<u32> {
        (**self).rendered_width()
    }
}

impl<T: Measurable + ?Sized> Measurable for &T {
    fn rendered_width(&self) -> Option<u32> {
        (**self).rendered_width()
    }
}

/// Width cell shared between a host (writer) and the controller (reader)
///
/// Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct SharedWidth(Rc<Cell<Option<u32>>>);

impl SharedWidth {
    /// A handle that has not been laid out yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle with a known width
    pub fn with_width(width: u32) -> Self {
        let handle = Self::new();
        handle.set(width);
        handle
    }

    pub fn set(&self, width: u32) {
        self.0.set(Some(width));
    }

    /// Forget the width, e.g. when the node is detached
    pub fn clear(&self) {
        self.0.set(None);
    }

    pub fn get(&self) -> Option<u32> {
        self.0.get()
    }
}

impl Measurable for SharedWidth {
    fn rendered_width(&self) -> Option<u32> {
        self.get()
    }
}

/// One reading of both widths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub container_width: u32,
    pub text_width: u32,
}

impl Measurement {
    /// Read both handles, or `None` if either is not available
    pub fn read(container: &dyn Measurable, text: &dyn Measurable) -> Option<Self> {
        Some(Self {
            container_width: container.rendered_width()?,
            text_width: text.rendered_width()?,
        })
    }

    /// How far the text must move to reveal its hidden tail.
    /// Negative when the text fits inside the container.
    #[inline]
    pub fn overflow_width(&self) -> i64 {
        i64::from(self.text_width) - i64::from(self.container_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_width() {
        let m = Measurement {
            container_width: 50,
            text_width: 120,
        };
        assert_eq!(m.overflow_width(), 70);

        let m = Measurement {
            container_width: 120,
            text_width: 50,
        };
        assert_eq!(m.overflow_width(), -70);
    }

    #[test]
    fn test_read_requires_both_widths() {
        let container = SharedWidth::with_width(50);
        let text = SharedWidth::new();
        assert!(Measurement::read(&container, &text).is_none());

        text.set(120);
        let m = Measurement::read(&container, &text).unwrap();
        assert_eq!(m.text_width, 120);

        container.clear();
        assert!(Measurement::read(&container, &text).is_none());
    }

    #[test]
    fn test_shared_width_clones_share_cell() {
        let a = SharedWidth::new();
        let b = a.clone();
        a.set(7);
        assert_eq!(b.rendered_width(), Some(7));
    }
}
