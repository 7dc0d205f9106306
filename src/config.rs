//! `config.toml` loading. Every section is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::playlist::{RetryPolicy, Track};

const CONFIG_ENV: &str = "PANCAKE_CONFIG";

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    home_dir().join(".config").join("pancake").join("config.toml")
}

pub fn default_log_path() -> PathBuf {
    home_dir().join(".cache").join("pancake").join("pancake.log")
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home)
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderConfig,
    pub player: PlayerConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
    pub stations: Vec<StationConfig>,
}

impl Config {
    /// Reads `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&data).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(data: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(data)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            program: "mpg123".into(),
            args: vec!["-q".into(), "-R".into(), "--no-gapless".into()],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub tick_interval_ms: u64,
    pub max_empty_batches: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            max_empty_batches: RetryPolicy::default().max_empty_batches,
        }
    }
}

impl PlayerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(50))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_empty_batches: self.max_empty_batches.max(1),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeName,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ThemeName {
    #[default]
    Default,
    Gruvbox,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StationConfig {
    pub name: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

fn default_batch_size() -> usize {
    4
}
