//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("thread_url is required")]
    MissingThreadUrl,

    #[error("Please enter a valid Reddit URL: {0}")]
    InvalidThreadUrl(String),
}

impl DomainError {
    /// Whether the error was caused by caller input (as opposed to the system)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingThreadUrl | DomainError::InvalidThreadUrl(_)
        )
    }
}
