//! Chat backend configuration from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};
use threadsense_domain::{ConfigIssue, ConfigIssueCode};

/// Which chat backend answers the agents and the classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendProvider {
    /// Deterministic canned replies, no network
    #[default]
    Demo,
    /// Any OpenAI-compatible chat completions endpoint
    OpenAi,
}

impl BackendProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendProvider::Demo => "demo",
            BackendProvider::OpenAi => "openai",
        }
    }
}

impl std::str::FromStr for BackendProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" | "mock" => Ok(BackendProvider::Demo),
            "openai" | "openai-compatible" | "janitor" => Ok(BackendProvider::OpenAi),
            _ => Err(()),
        }
    }
}

/// Raw backend configuration from TOML
///
/// # Example
///
/// ```toml
/// [backend]
/// provider = "openai"
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// model = "gpt-4o-mini"
/// temperature = 0.2
/// request_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// "demo" or "openai"
    pub provider: String,
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub model: String,
    pub temperature: f32,
    /// HTTP timeout for a single backend request
    pub request_timeout_secs: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            provider: "demo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            request_timeout_secs: 60,
        }
    }
}

impl FileBackendConfig {
    /// Parse provider string, falling back to demo with a warning.
    pub fn parse_provider(&self) -> (BackendProvider, Vec<ConfigIssue>) {
        match self.provider.parse::<BackendProvider>() {
            Ok(provider) => (provider, vec![]),
            Err(()) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "backend.provider".to_string(),
                        value: self.provider.clone(),
                        valid_values: vec!["demo".to_string(), "openai".to_string()],
                    },
                    format!(
                        "backend.provider: unknown value '{}', falling back to 'demo'",
                        self.provider
                    ),
                );
                (BackendProvider::Demo, vec![issue])
            }
        }
    }

    /// API key from the config file, or from `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let (provider, mut issues) = self.parse_provider();

        if provider == BackendProvider::OpenAi && self.resolve_api_key().is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingCredentials {
                    provider: provider.as_str().to_string(),
                },
                format!(
                    "backend.provider is 'openai' but neither backend.api_key nor ${} is set",
                    self.api_key_env
                ),
            ));
        }
        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "backend.request_timeout_secs".to_string(),
                },
                "backend.request_timeout_secs must be greater than zero",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidValue {
                    field: "backend.temperature".to_string(),
                },
                format!(
                    "backend.temperature: {} is outside 0.0..=2.0",
                    self.temperature
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        let mut config = FileBackendConfig::default();
        assert_eq!(config.parse_provider().0, BackendProvider::Demo);

        config.provider = "OpenAI".to_string();
        let (provider, issues) = config.parse_provider();
        assert_eq!(provider, BackendProvider::OpenAi);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unknown_provider_warns() {
        let config = FileBackendConfig {
            provider: "bard".to_string(),
            ..Default::default()
        };
        let (provider, issues) = config.parse_provider();
        assert_eq!(provider, BackendProvider::Demo);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("bard"));
    }

    #[test]
    fn test_openai_without_key_is_error() {
        let config = FileBackendConfig {
            provider: "openai".to_string(),
            api_key_env: "THREADSENSE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert!(ConfigIssue::any_errors(&issues));
    }

    #[test]
    fn test_openai_with_inline_key() {
        let config = FileBackendConfig {
            provider: "openai".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_empty());
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-test"));
    }
}
