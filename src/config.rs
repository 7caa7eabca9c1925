use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::AppConfig;

/// Optional YAML configuration; every field has a default
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Command that receives the code on stdin, e.g. "wl-copy" or "pbcopy"
    pub clipboard_command: Option<String>,
    pub vim_mode: bool,
    /// Refresh tick period in milliseconds
    pub tick_ms: u64,
    /// Pointer units per terminal column, for swipe thresholds
    pub cell_width_px: u16,
    pub db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clipboard_command: None,
            vim_mode: false,
            tick_ms: 100,
            cell_width_px: 8,
            db_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file parses as null
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("Invalid config file")
    }

    /// Load from `path`, or defaults when no file was found
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            vim_mode: self.vim_mode,
            clipboard_command: self.clipboard_command.clone().filter(|c| !c.trim().is_empty()),
            tick_period: Duration::from_millis(self.tick_ms.max(10)),
            cell_width_px: self.cell_width_px.max(1),
            ..AppConfig::default()
        }
    }
}

/// Locate the config file
///
/// An explicit path must exist. Otherwise `~/.config/authtui/config.yaml`,
/// then `./config.yaml`; `None` when neither exists.
pub fn get_config_path(cli_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        if path.exists() {
            return Ok(Some(path));
        }
        bail!("Config file not found at specified path: {}", path.display());
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("authtui").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}
