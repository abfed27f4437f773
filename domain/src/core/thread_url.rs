//! Thread URL value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use url::Url;

/// A validated Reddit thread URL (Value Object)
///
/// Only `http(s)` URLs on `reddit.com` or one of its subdomains, without
/// credentials or an explicit port, are accepted. Validation happens before
/// anything is dispatched.
///
/// # Example
///
/// ```
/// use threadsense_domain::ThreadUrl;
///
/// let url = ThreadUrl::parse("https://www.reddit.com/r/Science/comments/abc123/title/").unwrap();
/// assert_eq!(url.subreddit().as_deref(), Some("science"));
/// assert_eq!(url.json_url(), "https://www.reddit.com/r/Science/comments/abc123/title/.json");
///
/// assert!(ThreadUrl::parse("https://example.com/r/science").is_err());
/// assert!(ThreadUrl::parse("https://www.reddit.com:99999/r/science").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThreadUrl {
    /// Trimmed input, echoed back unchanged in results
    raw: String,
    url: Url,
}

impl ThreadUrl {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::MissingThreadUrl);
        }
        let invalid = || DomainError::InvalidThreadUrl(raw.to_string());

        let url = Url::parse(raw).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        if !url.username().is_empty() || url.password().is_some() || url.port().is_some() {
            return Err(invalid());
        }
        match url.host_str() {
            Some(host) if host == "reddit.com" || host.ends_with(".reddit.com") => {}
            _ => return Err(invalid()),
        }

        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Subreddit named in the path (`/r/<name>/...`), lower-cased.
    pub fn subreddit(&self) -> Option<String> {
        let mut segments = self.url.path_segments()?.filter(|s| !s.is_empty());
        segments.find(|s| s.eq_ignore_ascii_case("r"))?;
        segments
            .next()
            .filter(|name| name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
            .map(|name| name.to_ascii_lowercase())
    }

    /// Public JSON listing URL for the thread.
    pub fn json_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);

        let path = url.path();
        if !path.ends_with(".json") {
            let path = if path.ends_with('/') {
                format!("{path}.json")
            } else {
                format!("{path}/.json")
            };
            url.set_path(&path);
        }
        url.into()
    }
}

impl std::fmt::Display for ThreadUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TryFrom<String> for ThreadUrl {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ThreadUrl::parse(&value)
    }
}

impl From<ThreadUrl> for String {
    fn from(url: ThreadUrl) -> Self {
        url.raw
    }
}
