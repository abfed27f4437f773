//! Configuration file loading for threadsense
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `THREADSENSE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./threadsense.toml` or `./.threadsense.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/threadsense/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    BackendProvider, FileBackendConfig, FileConfig, FileHistoryConfig, FileLoggingConfig,
    FileModerationConfig, FileOutputConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
