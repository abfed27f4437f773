//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// audit_log = "~/.local/share/threadsense/audit.jsonl"
/// log_dir = "/var/log/threadsense"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL audit trail of agent decisions and final verdicts
    pub audit_log: Option<PathBuf>,
    /// Directory for daily-rotated diagnostic logs
    pub log_dir: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Audit log path with a leading `~` expanded.
    pub fn audit_log_path(&self) -> Option<PathBuf> {
        self.audit_log.as_deref().map(expand_home)
    }

    /// Log directory with a leading `~` expanded.
    pub fn log_dir_path(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(expand_home)
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_unchanged() {
        let config = FileLoggingConfig {
            audit_log: Some(PathBuf::from("/tmp/audit.jsonl")),
            log_dir: None,
        };
        assert_eq!(config.audit_log_path(), Some(PathBuf::from("/tmp/audit.jsonl")));
        assert_eq!(config.log_dir_path(), None);
    }

    #[test]
    fn test_home_expanded() {
        let config = FileLoggingConfig {
            audit_log: Some(PathBuf::from("~/audit.jsonl")),
            log_dir: None,
        };
        let path = config.audit_log_path().unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("audit.jsonl"));
        }
    }
}
