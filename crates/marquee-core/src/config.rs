use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shortest interval between two ticks. Timers run at millisecond resolution,
/// so very high speeds saturate here instead of collapsing to zero.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while the marquee is moving
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Options for one marquee instance
///
/// Every field is optional in the config file. `speed` is in pixels (terminal
/// columns for the TUI host) per second; each tick moves the text by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Content to display and measure
    #[serde(default)]
    pub text: String,
    /// Extra class appended to the container's class list
    #[serde(default)]
    pub class_name: String,
    /// Scroll by default and pause while the pointer is over the box
    #[serde(default)]
    pub hover_to_stop: bool,
    /// Restart from the beginning after each pass
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Delay before the first tick of a fresh pass
    #[serde(default)]
    pub leading_ms: u64,
    /// Pause inserted before wrapping back to the start
    #[serde(default)]
    pub trailing_ms: u64,
    /// Pixels per second
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            class_name: String::new(),
            hover_to_stop: false,
            looping: false,
            leading_ms: 0,
            trailing_ms: 0,
            speed: default_speed(),
        }
    }
}

impl MarqueeConfig {
    /// Create a config for the given text with all other options defaulted
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Reject settings the timer cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(crate::Error::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    /// Number of characters in the text, used to detect content changes
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extension trait for MarqueeConfig with timing helpers
pub trait MarqueeConfigExt {
    /// Interval between two ticks (1000 / speed ms)
    fn tick_interval(&self) -> Duration;

    /// Leading delay as Duration
    fn leading(&self) -> Duration;

    /// Trailing delay as Duration
    fn trailing(&self) -> Duration;
}

impl MarqueeConfigExt for MarqueeConfig {
    #[inline]
    fn tick_interval(&self) -> Duration {
        let nanos = (1_000_000_000.0 / self.speed).round();
        if nanos.is_finite() && nanos >= 0.0 {
            Duration::from_nanos(nanos as u64).max(MIN_TICK_INTERVAL)
        } else {
            MIN_TICK_INTERVAL
        }
    }

    #[inline]
    fn leading(&self) -> Duration {
        Duration::from_millis(self.leading_ms)
    }

    #[inline]
    fn trailing(&self) -> Duration {
        Duration::from_millis(self.trailing_ms)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_speed() -> f64 {
    50.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaulting when it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.marquee.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    /// Render the configuration as it would be written to disk
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/marquee/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marquee")
            .join("config.toml")
    }
}
