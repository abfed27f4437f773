//! History configuration from TOML (`[history]` section)

use serde::{Deserialize, Serialize};

/// Raw history configuration from TOML
///
/// ```toml
/// [history]
/// retention = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Entries kept in memory; oldest are evicted first. 0 disables history.
    pub retention: usize,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self { retention: 50 }
    }
}
