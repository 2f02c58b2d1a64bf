//! Watcher configuration.
//!
//! Stored as TOML. Every key is optional and overrides the built-in default:
//! - Linux: `~/.config/hslog/watcher.toml`
//! - Windows: `%APPDATA%/hslog/watcher.toml`
//!
//! The path can be overridden by the first CLI argument or `HSLOG_CONFIG`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use hslog_game_log::WatcherOptions;
use serde::{Deserialize, Serialize};

/// User overrides for [`WatcherOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main game log.
    pub log_file: Option<PathBuf>,

    /// Achievements log.
    pub log_file_achievements: Option<PathBuf>,

    /// Client `log.config` location.
    pub config_file: Option<PathBuf>,

    /// Line terminator of the game logs.
    pub end_of_line: Option<String>,
}

impl Config {
    /// Loads the configuration file, or all defaults if it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merges the overrides onto the platform defaults.
    pub fn into_options(self) -> WatcherOptions {
        let defaults = WatcherOptions::default();
        WatcherOptions {
            log_file: self.log_file.unwrap_or(defaults.log_file),
            log_file_achievements: self
                .log_file_achievements
                .unwrap_or(defaults.log_file_achievements),
            config_file: self.config_file.unwrap_or(defaults.config_file),
            end_of_line: self
                .end_of_line
                .filter(|eol| !eol.is_empty())
                .unwrap_or(defaults.end_of_line),
        }
    }
}

/// Resolves the configuration file path.
pub fn config_path(cli_arg: Option<OsString>) -> anyhow::Result<PathBuf> {
    if let Some(arg) = cli_arg {
        return Ok(PathBuf::from(arg));
    }
    if let Some(env) = std::env::var_os("HSLOG_CONFIG") {
        return Ok(PathBuf::from(env));
    }
    default_config_path()
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var_os("APPDATA")
            .ok_or_else(|| anyhow::anyhow!("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("hslog").join("watcher.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var_os("HOME").ok_or_else(|| anyhow::anyhow!("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("hslog")
            .join("watcher.toml"))
    }
}
