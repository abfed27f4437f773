//! Shared handler state

use std::sync::Arc;
use threadsense_application::ModerateThreadUseCase;

/// Static API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOptions {
    /// Add permissive CORS headers to every response
    pub cors: bool,
    /// Upper bound for `limit` on `/api/history`
    pub max_history_items: usize,
    /// Request bodies larger than this are rejected
    pub max_body_bytes: usize,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            cors: true,
            max_history_items: 50,
            max_body_bytes: 16 * 1024,
        }
    }
}

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub moderate: Arc<ModerateThreadUseCase>,
    /// Name of the chat backend, reported by `/health`
    pub backend_name: Arc<str>,
    pub options: ApiOptions,
}

impl AppState {
    pub fn new(moderate: Arc<ModerateThreadUseCase>, backend_name: impl Into<Arc<str>>) -> Self {
        Self {
            moderate,
            backend_name: backend_name.into(),
            options: ApiOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ApiOptions) -> Self {
        self.options = options;
        self
    }
}
