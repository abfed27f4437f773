//! Configuration issues reported by validation.
//!
//! Validation never aborts on the first problem; it returns every issue
//! found so the caller can print them together and decide whether any of
//! them is fatal.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the service cannot start with this configuration.
    Error,
    /// Non-fatal: the service starts but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A roster entry could not be turned into a routable agent.
    InvalidAgent { agent_id: String },
    /// A field holds a value outside its accepted set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field is zero or otherwise unusable.
    InvalidValue { field: String },
    /// A real backend was selected without credentials.
    MissingCredentials { provider: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Whether any issue in the list is fatal.
    pub fn any_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_errors() {
        let warning = ConfigIssue::warning(
            ConfigIssueCode::InvalidValue {
                field: "history.retention".to_string(),
            },
            "retention is zero",
        );
        assert!(!ConfigIssue::any_errors(std::slice::from_ref(&warning)));

        let error = ConfigIssue::error(
            ConfigIssueCode::MissingCredentials {
                provider: "openai".to_string(),
            },
            "missing api key",
        );
        assert!(ConfigIssue::any_errors(&[warning, error]));
    }
}
