use std::path::Path;

use anyhow::Result;
use tracing::info;

use marquee_core::AppConfig;

use super::MarqueeArgs;

/// Print the effective configuration, optionally writing it back to disk
pub fn run(
    config: &AppConfig,
    path: Option<&Path>,
    marquee: &MarqueeArgs,
    write: bool,
) -> Result<()> {
    let effective = effective_config(config, marquee)?;

    if write {
        match path {
            Some(path) => {
                effective.save_to(path)?;
                info!(path = %path.display(), "Configuration saved");
            }
            None => {
                effective.save()?;
                info!(path = %AppConfig::config_path().display(), "Configuration saved");
            }
        }
    }

    print!("{}", effective.to_toml()?);
    Ok(())
}

/// The loaded configuration with command-line marquee options applied
fn effective_config(config: &AppConfig, marquee: &MarqueeArgs) -> Result<AppConfig> {
    Ok(AppConfig {
        marquee: marquee.merge(&config.marquee)?,
        ..config.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_values() {
        let mut config = AppConfig::default();
        config.marquee.text = "from file".to_string();
        config.marquee.trailing_ms = 100;

        let args = MarqueeArgs {
            looping: true,
            speed: Some(25.0),
            ..Default::default()
        };
        let effective = effective_config(&config, &args).unwrap();
        assert_eq!(effective.marquee.text, "from file");
        assert_eq!(effective.marquee.trailing_ms, 100);
        assert!(effective.marquee.looping);
        assert_eq!(effective.marquee.speed, 25.0);
    }

    #[test]
    fn test_write_saves_to_explicit_path() {
        let path = std::env::temp_dir().join(format!(
            "marquee-cli-config-{}.toml",
            std::process::id()
        ));
        let args = MarqueeArgs {
            text: Some("saved".to_string()),
            ..Default::default()
        };

        run(&AppConfig::default(), Some(&path), &args, true).unwrap();
        let loaded = AppConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap().marquee.text, "saved");
    }
}
