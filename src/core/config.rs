//! Bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Add reminder data paths
//! - 1.0.0: Initial creation with JSON server config

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_VAR: &str = "ANZU_CONFIG";

/// Default config file path when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Bot configuration, loaded from a JSON file.
///
/// The connection fields describe the IRC server the embedding transport
/// should join; the data fields tell the reminder store where its snapshot
/// files live. Every field has a default so a missing config file still
/// yields a usable local setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IRC server hostname.
    pub server: String,
    /// IRC server port.
    pub port: u16,
    /// Nick the bot connects with.
    pub nick: String,
    /// Channels to join on connect.
    pub channels: Vec<String>,
    /// Directory for archive snapshots of the reminder store.
    pub data_dir: PathBuf,
    /// Canonical reminder snapshot file.
    pub reminds_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: "irc.libera.chat".to_string(),
            port: 6667,
            nick: "anzu".to_string(),
            channels: Vec::new(),
            data_dir: PathBuf::from("data/reminds"),
            reminds_file: PathBuf::from("reminds.bin"),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file is not an error: the defaults are returned so the bot
    /// can run without any local setup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the path named by `ANZU_CONFIG`,
    /// falling back to `config.json`.
    pub fn from_env() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Config::load(Path::new(&path))
    }
}
