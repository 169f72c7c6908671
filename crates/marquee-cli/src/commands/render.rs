use std::time::Duration;

use anyhow::Result;

use marquee_core::MarqueeConfig;

use super::{headless_controller, LayoutArgs};

pub fn run(config: MarqueeConfig, layout: &LayoutArgs, hover_ms: Option<u64>) -> Result<()> {
    let mut controller = headless_controller(config, layout)?;

    if let Some(hover_ms) = hover_ms {
        controller.pointer_enter();
        controller.advance(Duration::from_millis(hover_ms));
    }

    println!("{}", controller.render().to_json()?);

    Ok(())
}
