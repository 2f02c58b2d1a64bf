//! Installs the client `log.config` that makes the game write its logs.

use std::io::Write;
use std::path::Path;

use crate::error::WatchError;

/// Bundled `log.config` enabling the log sections the parser reads.
pub const LOG_CONFIG_TEMPLATE: &str = include_str!("log.config");

/// Writes the bundled template to `path` unless a file is already there.
///
/// An existing config belongs to the user or another tracker and is left
/// alone. Returns whether the template was written.
pub fn ensure_installed(path: &Path) -> Result<bool, WatchError> {
    if path.exists() {
        tracing::info!(target: "hslog::main", path = %path.display(), "using pre-existing log.config");
        return Ok(false);
    }

    let install_err = |source| WatchError::ClientConfig {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(install_err)?;
    }
    let mut file = std::fs::File::create(path).map_err(install_err)?;
    file.write_all(LOG_CONFIG_TEMPLATE.as_bytes())
        .map_err(install_err)?;

    tracing::info!(
        target: "hslog::main",
        path = %path.display(),
        "copied log.config so the client writes its log files"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_template_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Blizzard").join("Hearthstone").join("log.config");

        assert!(ensure_installed(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), LOG_CONFIG_TEMPLATE);
    }

    #[test]
    fn keeps_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("log.config");
        std::fs::write(&path, "[Power]\nLogLevel=1\n").unwrap();

        assert!(!ensure_installed(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[Power]\nLogLevel=1\n");
    }

    #[test]
    fn reports_unwritable_location() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = ensure_installed(&blocker.join("log.config")).unwrap_err();
        assert!(matches!(err, WatchError::ClientConfig { .. }));
    }

    #[test]
    fn template_enables_parsed_sections() {
        for section in ["[Zone]", "[Power]", "[Achievements]"] {
            assert!(LOG_CONFIG_TEMPLATE.contains(section), "missing {section}");
        }
    }
}
