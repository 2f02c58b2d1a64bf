//! Watcher options and their platform defaults.

use std::path::PathBuf;

/// Paths and separator used by [`LogWatcher`](crate::LogWatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherOptions {
    /// Main game log (`Power.log`).
    pub log_file: PathBuf,
    /// Achievements log, where card acquisitions are written.
    pub log_file_achievements: PathBuf,
    /// Client `log.config`; the game only writes the logs above when it exists.
    pub config_file: PathBuf,
    /// Line terminator used to split tailed chunks.
    pub end_of_line: String,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        let logs = default_install_dir().join("Logs");
        Self {
            log_file: logs.join("Power.log"),
            log_file_achievements: logs.join("Achievements.log"),
            config_file: default_config_dir().join("log.config"),
            end_of_line: "\n".into(),
        }
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(target_os = "windows")]
fn default_install_dir() -> PathBuf {
    PathBuf::from(r"C:\Program Files (x86)\Hearthstone")
}

#[cfg(target_os = "macos")]
fn default_install_dir() -> PathBuf {
    PathBuf::from("/Applications/Hearthstone")
}

/// Default Wine prefix install on other platforms.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_install_dir() -> PathBuf {
    home_dir()
        .join(".wine")
        .join("drive_c")
        .join("Program Files (x86)")
        .join("Hearthstone")
}

#[cfg(target_os = "windows")]
fn default_config_dir() -> PathBuf {
    std::env::var_os("LOCALAPPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join("AppData").join("Local"))
        .join("Blizzard")
        .join("Hearthstone")
}

#[cfg(target_os = "macos")]
fn default_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Preferences")
        .join("Blizzard")
        .join("Hearthstone")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_config_dir() -> PathBuf {
    let user = std::env::var("USER").unwrap_or_else(|_| "user".into());
    home_dir()
        .join(".wine")
        .join("drive_c")
        .join("users")
        .join(user)
        .join("AppData")
        .join("Local")
        .join("Blizzard")
        .join("Hearthstone")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hearthstone_files() {
        let options = WatcherOptions::default();
        assert!(options.log_file.ends_with(PathBuf::from("Logs").join("Power.log")));
        assert_eq!(
            options.log_file_achievements.file_name().and_then(|n| n.to_str()),
            Some("Achievements.log")
        );
        assert_eq!(
            options.config_file.file_name().and_then(|n| n.to_str()),
            Some("log.config")
        );
        assert_eq!(options.end_of_line, "\n");
    }

    #[test]
    fn logs_share_a_directory() {
        let options = WatcherOptions::default();
        assert_eq!(options.log_file.parent(), options.log_file_achievements.parent());
    }
}
