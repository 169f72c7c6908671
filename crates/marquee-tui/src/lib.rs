pub mod clock;
pub mod event;
pub mod hover;
pub mod theme;
pub mod view;
pub mod widgets;

pub use theme::Theme;
pub use view::MarqueeView;
