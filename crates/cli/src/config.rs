use anyhow::{Context, Result};
use engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::output::Format;

#[cfg(windows)]
pub fn config_dir() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("spa")
}

#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("spa")
}

fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,
    /// Colour text output when the terminal supports it.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            color: default_color(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Loads the configuration from `path`, or from the default location when
/// no path is given. A missing default file yields the defaults; a missing
/// explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = config_file_path();
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
