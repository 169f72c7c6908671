use std::time::Duration;

use anyhow::Result;
use tracing::info;

use marquee_core::{MarqueeConfig, MarqueeController, Phase, TimerQueue};

use super::{headless_controller, LayoutArgs};

#[derive(Debug, Clone)]
pub struct SimulateParams {
    pub duration_ms: u64,
    pub hover: bool,
    pub realtime: bool,
    pub json: bool,
}

/// One line of the printed timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub at: Duration,
    pub offset: u32,
    pub phase: Phase,
}

pub async fn run(config: MarqueeConfig, layout: &LayoutArgs, params: &SimulateParams) -> Result<()> {
    let mut controller = headless_controller(config, layout)?;
    info!(
        overflow_width = controller.overflow_width(),
        duration_ms = params.duration_ms,
        "Simulating marquee"
    );

    if controller.overflow_width() < 0 {
        println!(
            "Text fits with {} to spare, nothing to scroll.",
            -controller.overflow_width()
        );
    }

    if params.hover {
        controller.pointer_enter();
    }

    let end = Duration::from_millis(params.duration_ms);
    play(&mut controller, end, params.realtime, |frame| {
        println!(
            "{:>7}ms  offset {:>4}  {:?}",
            frame.at.as_millis(),
            frame.offset,
            frame.phase
        );
    })
    .await;

    if params.json {
        println!("{}", controller.render().to_json()?);
    }

    Ok(())
}

/// Step through every timer due before `end`, reporting each visible change
pub async fn play<F>(
    controller: &mut MarqueeController<TimerQueue>,
    end: Duration,
    realtime: bool,
    mut report: F,
) where
    F: FnMut(&Frame),
{
    let mut last = snapshot(controller);
    report(&last);

    while let Some(gap) = next_gap(controller, end) {
        if realtime {
            tokio::time::sleep(gap).await;
        }
        controller.advance(gap);

        let frame = snapshot(controller);
        if frame.offset != last.offset || frame.phase != last.phase {
            report(&frame);
            last = frame;
        }
    }
}

fn snapshot(controller: &MarqueeController<TimerQueue>) -> Frame {
    Frame {
        at: controller.now(),
        offset: controller.animated_width(),
        phase: controller.phase(),
    }
}

/// Time until the next timer, if it falls inside the run
fn next_gap(controller: &MarqueeController<TimerQueue>, end: Duration) -> Option<Duration> {
    let deadline = controller.scheduler().next_deadline()?;
    if deadline > end {
        return None;
    }
    Some(deadline.saturating_sub(controller.now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(container_width: u32, text_width: u32) -> LayoutArgs {
        LayoutArgs {
            container_width,
            text_width: Some(text_width),
        }
    }

    #[tokio::test]
    async fn test_single_pass_timeline() {
        let mut controller =
            headless_controller(MarqueeConfig::with_text("Hello World"), &layout(10, 13)).unwrap();
        controller.pointer_enter();

        let mut frames = Vec::new();
        play(&mut controller, Duration::from_secs(5), false, |f| frames.push(*f)).await;

        let offsets: Vec<u32> = frames.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 3]);
        assert_eq!(frames.last().unwrap().phase, Phase::Stopped);
        assert_eq!(frames[1].at, Duration::ZERO);
        assert_eq!(frames[3].at, Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_timeline_stops_at_end() {
        let config = MarqueeConfig {
            text: "Hello World".to_string(),
            hover_to_stop: true,
            looping: true,
            ..Default::default()
        };
        let mut controller = headless_controller(config, &layout(10, 13)).unwrap();

        let mut frames = Vec::new();
        play(&mut controller, Duration::from_millis(100), false, |f| frames.push(*f)).await;

        assert!(frames.iter().all(|f| f.at <= Duration::from_millis(100)));
        assert!(frames.iter().any(|f| f.offset == 3));
        assert!(controller.is_animating());
    }
}
