//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for moderation results on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Final decision, every agent decision and every comment label
    Full,
    /// Final decision and breakdown only (default)
    #[default]
    Summary,
    /// The HTTP response body, pretty-printed
    Json,
}
