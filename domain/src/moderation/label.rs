//! Canonical moderation labels and the decision normalizer.
//!
//! Different agents spell the same verdict differently (`PLATFORM_VIOLATION`
//! vs `VIOLATION`, `CLEAN` vs `FINE`, ...). Everything downstream of the
//! agents works on [`ModerationLabel`] only; raw strings are mapped through
//! [`ModerationLabel::normalize`] exactly once.

use serde::{Deserialize, Serialize};

/// Alias table: raw agent vocabulary → canonical label.
///
/// Lookups are done on the trimmed, ASCII-uppercased input.
const ALIASES: &[(&str, ModerationLabel)] = &[
    ("VIOLATION", ModerationLabel::Violation),
    ("PLATFORM_VIOLATION", ModerationLabel::Violation),
    ("NEEDS_WARNING", ModerationLabel::NeedsWarning),
    ("GLOBAL_WARNING", ModerationLabel::NeedsWarning),
    ("FINE", ModerationLabel::Fine),
    ("CLEAN", ModerationLabel::Fine),
    ("ERROR", ModerationLabel::Error),
    ("INCONCLUSIVE", ModerationLabel::Error),
];

/// Canonical moderation label (Value Object)
///
/// Severity order is `Violation > NeedsWarning > Fine`. `Error` means the
/// judgment is missing or unusable and is not comparable with the others.
///
/// # Example
///
/// ```
/// use threadsense_domain::ModerationLabel;
///
/// assert_eq!(ModerationLabel::normalize("PLATFORM_VIOLATION"), ModerationLabel::Violation);
/// assert_eq!(ModerationLabel::normalize("clean"), ModerationLabel::Fine);
/// assert_eq!(ModerationLabel::normalize("MAYBE"), ModerationLabel::Error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationLabel {
    Violation,
    NeedsWarning,
    Fine,
    Error,
}

impl ModerationLabel {
    /// All labels, in display order.
    pub const ALL: [ModerationLabel; 4] = [
        ModerationLabel::Violation,
        ModerationLabel::NeedsWarning,
        ModerationLabel::Fine,
        ModerationLabel::Error,
    ];

    /// Map a raw decision string onto the canonical taxonomy.
    ///
    /// Unknown spellings map to [`ModerationLabel::Error`], never to `Fine`.
    pub fn normalize(raw: &str) -> Self {
        let key = raw.trim().to_ascii_uppercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, label)| *label)
            .unwrap_or(ModerationLabel::Error)
    }

    /// Canonical spelling used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationLabel::Violation => "VIOLATION",
            ModerationLabel::NeedsWarning => "NEEDS_WARNING",
            ModerationLabel::Fine => "FINE",
            ModerationLabel::Error => "ERROR",
        }
    }

    /// Severity rank, `None` for `Error`.
    pub fn severity(&self) -> Option<u8> {
        match self {
            ModerationLabel::Violation => Some(3),
            ModerationLabel::NeedsWarning => Some(2),
            ModerationLabel::Fine => Some(1),
            ModerationLabel::Error => None,
        }
    }

    /// Whether this label carries a usable judgment.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ModerationLabel::Error)
    }

    /// Pick the more severe of two labels. `Error` loses against any valid label.
    pub fn escalate(self, other: ModerationLabel) -> ModerationLabel {
        match (self.severity(), other.severity()) {
            (Some(a), Some(b)) if b > a => other,
            (None, Some(_)) => other,
            _ => self,
        }
    }
}

impl std::fmt::Display for ModerationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModerationLabel {
    type Err = String;

    /// Strict parse: only the four canonical spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModerationLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown moderation label: {}. Valid: VIOLATION, NEEDS_WARNING, FINE, ERROR",
                    s
                )
            })
    }
}
