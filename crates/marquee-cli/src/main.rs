use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::AppConfig;

mod commands;

use commands::MarqueeArgs;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Scroll a line of text that does not fit its box")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of ~/.config/marquee/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the marquee in the terminal (default)
    Run {
        #[command(flatten)]
        marquee: MarqueeArgs,
        /// Width of the marquee box in columns
        #[arg(short = 'w', long, default_value_t = 30)]
        width: u16,
        /// Write logs to stderr while the screen is open
        #[arg(long)]
        log: bool,
    },
    /// Run the animation on a virtual clock and print the offset timeline
    Simulate {
        #[command(flatten)]
        marquee: MarqueeArgs,
        #[command(flatten)]
        layout: commands::LayoutArgs,
        /// How much virtual time to run
        #[arg(short = 'd', long, default_value_t = 2000)]
        duration_ms: u64,
        /// Hold the pointer over the box for the whole run
        #[arg(long)]
        hover: bool,
        /// Sleep between ticks so the timeline plays in real time
        #[arg(long)]
        realtime: bool,
        /// Print the final render description as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the render description for the given widths
    Render {
        #[command(flatten)]
        marquee: MarqueeArgs,
        #[command(flatten)]
        layout: commands::LayoutArgs,
        /// Hover the box for this long before rendering
        #[arg(long)]
        hover_ms: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        marquee: MarqueeArgs,
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // The interactive screen owns the terminal, so it only logs on request
    let log_enabled = !matches!(cli.command, None | Some(Commands::Run { log: false, .. }));
    if log_enabled {
        init_logging(&config.general.log_level);
    }

    match cli.command {
        None => commands::run::run(&config, config.marquee.clone(), 30).await,
        Some(Commands::Run { marquee, width, .. }) => {
            let options = marquee.merge(&config.marquee)?;
            commands::run::run(&config, options, width).await
        }
        Some(Commands::Simulate {
            marquee,
            layout,
            duration_ms,
            hover,
            realtime,
            json,
        }) => {
            let options = marquee.merge(&config.marquee)?;
            let params = commands::simulate::SimulateParams {
                duration_ms,
                hover,
                realtime,
                json,
            };
            commands::simulate::run(options, &layout, &params).await
        }
        Some(Commands::Render {
            marquee,
            layout,
            hover_ms,
        }) => {
            let options = marquee.merge(&config.marquee)?;
            commands::render::run(options, &layout, hover_ms)
        }
        Some(Commands::Config { marquee, write }) => {
            commands::config::run(&config, cli.config.as_deref(), &marquee, write)
        }
    }
}
