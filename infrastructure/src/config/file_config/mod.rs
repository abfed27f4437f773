//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod history;
mod logging;
mod moderation;
mod output;
mod server;

pub use backend::{BackendProvider, FileBackendConfig};
pub use history::FileHistoryConfig;
pub use logging::FileLoggingConfig;
pub use moderation::FileModerationConfig;
pub use output::FileOutputConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use threadsense_domain::{AgentProfile, AgentRoster, ConfigIssue, ConfigIssueCode, RosterError};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP API settings
    pub server: FileServerConfig,
    /// Chat backend used by agents and the classifier
    pub backend: FileBackendConfig,
    /// Dispatch timeouts and comment limits
    pub moderation: FileModerationConfig,
    /// In-memory history retention
    pub history: FileHistoryConfig,
    /// Audit trail and log files
    pub logging: FileLoggingConfig,
    /// Console output of `threadsense moderate`
    pub output: FileOutputConfig,
    /// Agent roster override; empty means the built-in roster
    ///
    /// ```toml
    /// [[agents]]
    /// subreddit = "gaming"
    /// agent_id = "agent-gaming"
    /// patterns = ["gaming", "pcgaming", "games"]
    ///
    /// [[agents]]
    /// subreddit = "reddit"
    /// agent_id = "agent-reddit-platform"
    /// scope = "platform"
    /// ```
    pub agents: Vec<AgentProfile>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Backend provider and credentials
    /// 2. Zero timeouts and limits
    /// 3. The agent roster (patterns compile, a subreddit agent exists)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.backend.validate());
        issues.extend(self.moderation.validate());

        if let Err(e) = self.build_roster() {
            let agent_id = match &e {
                RosterError::InvalidPattern { agent_id, .. } => agent_id.clone(),
                RosterError::UnknownDefault(name) => name.clone(),
                RosterError::NoSpecialist => String::new(),
            };
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidAgent { agent_id },
                format!("agents: {e}"),
            ));
        }

        issues
    }

    /// Build the routing roster from `[[agents]]`, or the built-in one.
    pub fn build_roster(&self) -> Result<AgentRoster, RosterError> {
        let profiles = if self.agents.is_empty() {
            AgentRoster::builtin_profiles()
        } else {
            self.agents.clone()
        };
        let default = match (&self.moderation.default_agent, self.agents.is_empty()) {
            (Some(name), _) => Some(name.as_str()),
            (None, true) => Some("askreddit"),
            (None, false) => None,
        };
        AgentRoster::new(profiles, default)
    }
}
