use crate::geometry::Viewport;
use crate::sound::SoundClear;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Timings {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "loading_blink_ms")]
    pub loading_blink: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "warmup_ms")]
    pub warmup: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "spawn_period_ms")]
    pub spawn_period: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "shake_period_ms")]
    pub shake_period: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "shake_length_ms")]
    pub shake_length: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "ambient_period_ms")]
    pub ambient_period: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "sound_linger_ms")]
    pub sound_linger: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "cursor_lag_ms")]
    pub cursor_lag: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            loading_blink: Duration::from_millis(500),
            warmup: Duration::from_millis(5000),
            spawn_period: Duration::from_millis(3000),
            shake_period: Duration::from_millis(10_000),
            shake_length: Duration::from_millis(500),
            ambient_period: Duration::from_millis(5000),
            sound_linger: Duration::from_millis(500),
            cursor_lag: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundSettings {
    pub clear: SoundClear,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

impl WindowSettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f64, self.height as f64)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub timings: Timings,
    #[serde(default)]
    pub sound: SoundSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pester", "pester").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(get_config_path()?)
}

pub fn load_config_from(path: PathBuf) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// `PESTER__<SECTION>__<KEY>` overrides a key from the file.
fn environment() -> config::Environment {
    config::Environment::with_prefix("PESTER").separator("__")
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_file_matches_defaults() {
        assert_eq!(parse(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = parse(
            r#"
            [timings]
            spawn_period_ms = 250

            [sound]
            clear = "if-unchanged"
            "#,
        );

        assert_eq!(config.timings.spawn_period, Duration::from_millis(250));
        assert_eq!(config.timings.warmup, Duration::from_millis(5000));
        assert_eq!(config.sound.clear, SoundClear::IfUnchanged);
        assert_eq!(config.window, WindowSettings::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let name = "PESTER__TIMINGS__SPAWN_PERIOD_MS";
        assert!(DEFAULT_CONFIG.contains(name));

        let vars = config::Map::from([(name.to_string(), "1000".to_string())]);
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.timings.spawn_period, Duration::from_millis(1000));
        assert_eq!(config.timings.shake_period, Duration::from_millis(10_000));
    }

    #[test]
    fn test_single_underscore_prefix_is_ignored() {
        let vars = config::Map::from([(
            "PESTER_TIMINGS__SPAWN_PERIOD_MS".to_string(),
            "1000".to_string(),
        )]);
        let config: Config = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.timings.spawn_period, Duration::from_millis(3000));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = load_config_from(PathBuf::from("/nonexistent/pester/config.toml")).unwrap();
        assert_eq!(config.timings, Timings::default());
    }
}
