//! Public JSON listing reader

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use threadsense_application::{CommentSourcePort, DispatchError};
use threadsense_domain::{ThreadUrl, excerpt};
use tracing::debug;

/// Reddit rejects the default reqwest agent on the public endpoints.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Comments returned per thread
const DEFAULT_MAX_COMMENTS: usize = 200;

/// Fetches top-level comment bodies from `<thread>/.json`
pub struct RedditCommentSource {
    client: reqwest::Client,
    max_comments: usize,
    timeout: Duration,
}

impl RedditCommentSource {
    pub fn new(timeout: Duration) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            max_comments: DEFAULT_MAX_COMMENTS,
            timeout,
        })
    }

    pub fn with_max_comments(mut self, max_comments: usize) -> Self {
        self.max_comments = max_comments;
        self
    }
}

#[async_trait]
impl CommentSourcePort for RedditCommentSource {
    async fn fetch_comments(&self, thread_url: &ThreadUrl) -> Result<Vec<String>, DispatchError> {
        let url = thread_url.json_url();
        debug!("Fetching comments from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout)
                } else {
                    DispatchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Upstream {
                status: status.as_u16(),
                body: excerpt(&body, 200),
            });
        }

        let listing: Value = response
            .json()
            .await
            .map_err(|e| DispatchError::InvalidResponse(e.to_string()))?;

        let mut comments = comments_from_listing(&listing)?;
        comments.truncate(self.max_comments);
        Ok(comments)
    }
}

/// Top-level comment bodies of a thread listing (`[post, comments]`).
///
/// Deleted and removed comments and "load more" stubs are skipped.
pub fn comments_from_listing(listing: &Value) -> Result<Vec<String>, DispatchError> {
    let children = listing
        .pointer("/1/data/children")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            DispatchError::InvalidResponse("listing has no comment children".to_string())
        })?;

    Ok(children
        .iter()
        .filter_map(|child| child.pointer("/data/body").and_then(Value::as_str))
        .map(str::trim)
        .filter(|body| !body.is_empty() && *body != "[deleted]" && *body != "[removed]")
        .map(str::to_string)
        .collect())
}
