mod marquee;
mod status_bar;

pub use marquee::{display_width, visible_window, MarqueeWidget};
pub use status_bar::StatusBarWidget;
