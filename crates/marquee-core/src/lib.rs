pub mod config;
pub mod controller;
pub mod error;
pub mod measure;
pub mod render;
pub mod scheduler;

pub use config::{AppConfig, MarqueeConfig, MarqueeConfigExt};
pub use controller::{MarqueeController, Phase};
pub use error::{Error, Result};
pub use measure::{Measurable, Measurement, SharedWidth};
pub use render::RenderDescription;
pub use scheduler::{Scheduler, Tick, TimerQueue, TimerToken};
