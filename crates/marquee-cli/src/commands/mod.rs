pub mod config;
pub mod render;
pub mod run;
pub mod simulate;

use anyhow::Result;
use clap::Args;

use marquee_core::{MarqueeConfig, MarqueeController, SharedWidth, TimerQueue};
use marquee_tui::widgets::display_width;

/// Marquee options that override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct MarqueeArgs {
    /// Text to scroll
    #[arg(short = 't', long)]
    pub text: Option<String>,
    /// Scroll by default and pause while hovered
    #[arg(long)]
    pub hover_to_stop: bool,
    /// Start over after each pass
    #[arg(long = "loop")]
    pub looping: bool,
    /// Delay before the first tick of a pass
    #[arg(long)]
    pub leading_ms: Option<u64>,
    /// Pause before wrapping back to the start
    #[arg(long)]
    pub trailing_ms: Option<u64>,
    /// Columns per second
    #[arg(long)]
    pub speed: Option<f64>,
    /// Extra class for the container
    #[arg(long)]
    pub class_name: Option<String>,
}

impl MarqueeArgs {
    /// Layer the flags over `base`, validating the result
    pub fn merge(&self, base: &MarqueeConfig) -> Result<MarqueeConfig> {
        let mut config = base.clone();
        if let Some(text) = &self.text {
            config.text = text.clone();
        }
        if self.hover_to_stop {
            config.hover_to_stop = true;
        }
        if self.looping {
            config.looping = true;
        }
        if let Some(leading) = self.leading_ms {
            config.leading_ms = leading;
        }
        if let Some(trailing) = self.trailing_ms {
            config.trailing_ms = trailing;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(class_name) = &self.class_name {
            config.class_name = class_name.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Synthetic widths for the headless commands
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Width of the container box
    #[arg(long, default_value_t = 50)]
    pub container_width: u32,
    /// Width of the text node (defaults to the text's column count)
    #[arg(long)]
    pub text_width: Option<u32>,
}

/// A controller on a virtual clock measuring against fixed widths
pub fn headless_controller(
    config: MarqueeConfig,
    layout: &LayoutArgs,
) -> Result<MarqueeController<TimerQueue>> {
    let text_width = layout
        .text_width
        .unwrap_or_else(|| display_width(&config.text));
    let mut controller = MarqueeController::new(
        config,
        TimerQueue::new(),
        SharedWidth::with_width(layout.container_width),
        SharedWidth::with_width(text_width),
    )?;
    controller.on_attach();
    Ok(controller)
}
