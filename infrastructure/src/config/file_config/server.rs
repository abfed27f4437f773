//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8000"
/// cors = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address the API listens on
    pub bind: String,
    /// Add permissive CORS headers (the dashboard runs on another origin)
    pub cors: bool,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            cors: true,
        }
    }
}
