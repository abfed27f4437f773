//! Moderate Thread use case
//!
//! Orchestrates one moderation run: route the thread to its agents, dispatch
//! them and the comment classifier in parallel, and assemble the result.
//!
//! Collaborator failures never fail the run. A failed or timed-out agent
//! becomes an `ERROR` decision, a failed classification job becomes one
//! `ERROR` label per comment. Only malformed input and assembly errors are
//! returned as `Err`.

use crate::config::ModerationParams;
use crate::ports::audit_log::{AuditEvent, AuditLog, NoAuditLog};
use crate::ports::comment_classifier::CommentClassifierPort;
use crate::ports::comment_source::CommentSourcePort;
use crate::ports::history_store::{HistoryStorePort, NoHistory};
use crate::ports::moderation_agent::{AgentRequest, DispatchError, ModerationAgentPort};
use crate::ports::progress::{ModerationProgress, NoProgress};
use crate::ports::shared_memory::SharedMemoryPort;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use threadsense_domain::{
    AgentDecision, AgentProfile, AgentRoster, AssemblyError, CommentClassification, DomainError,
    HistoryEntry, ModerationResult, ModerationResultBuilder, ThreadUrl, excerpt,
};
use tracing::{debug, info, warn};

/// Subreddit reported when the URL does not name one.
pub const UNKNOWN_SUBREDDIT: &str = "unknown";

/// Shared memory id reported when the block could not be acquired.
pub const UNAVAILABLE_MEMORY_ID: &str = "unavailable";

/// Errors that fail a moderation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModerateThreadError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error("internal error: {0}")]
    Assembly(#[from] AssemblyError),
}

impl ModerateThreadError {
    /// Whether the caller sent bad input (as opposed to a server-side fault).
    pub fn is_input_error(&self) -> bool {
        matches!(self, ModerateThreadError::InvalidInput(_))
    }
}

/// Input for the ModerateThread use case
#[derive(Debug, Clone)]
pub struct ModerateThreadInput {
    pub thread_url: String,
}

impl ModerateThreadInput {
    pub fn new(thread_url: impl Into<String>) -> Self {
        Self {
            thread_url: thread_url.into(),
        }
    }
}

/// Use case for moderating one Reddit thread
pub struct ModerateThreadUseCase {
    agents: Arc<dyn ModerationAgentPort>,
    classifier: Arc<dyn CommentClassifierPort>,
    comments: Arc<dyn CommentSourcePort>,
    shared_memory: Arc<dyn SharedMemoryPort>,
    history: Arc<dyn HistoryStorePort>,
    audit_log: Arc<dyn AuditLog>,
    roster: Arc<AgentRoster>,
    params: ModerationParams,
}

impl ModerateThreadUseCase {
    pub fn new(
        agents: Arc<dyn ModerationAgentPort>,
        classifier: Arc<dyn CommentClassifierPort>,
        comments: Arc<dyn CommentSourcePort>,
        shared_memory: Arc<dyn SharedMemoryPort>,
        roster: Arc<AgentRoster>,
    ) -> Self {
        Self {
            agents,
            classifier,
            comments,
            shared_memory,
            history: Arc::new(NoHistory),
            audit_log: Arc::new(NoAuditLog),
            roster,
            params: ModerationParams::default(),
        }
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryStorePort>) -> Self {
        self.history = history;
        self
    }

    pub fn with_audit_log(mut self, audit_log: Arc<dyn AuditLog>) -> Self {
        self.audit_log = audit_log;
        self
    }

    pub fn with_params(mut self, params: ModerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    pub fn history(&self) -> &Arc<dyn HistoryStorePort> {
        &self.history
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: ModerateThreadInput,
    ) -> Result<ModerationResult, ModerateThreadError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ModerateThreadInput,
        progress: &dyn ModerationProgress,
    ) -> Result<ModerationResult, ModerateThreadError> {
        let thread_url = ThreadUrl::parse(&input.thread_url)?;
        let subreddit = thread_url
            .subreddit()
            .unwrap_or_else(|| UNKNOWN_SUBREDDIT.to_string());
        let selection = self.roster.select(&subreddit);

        info!(
            "Moderating {} (r/{}) with agent {}",
            thread_url, subreddit, selection.specialist.agent_id
        );

        let comments = self.fetch_comments(&thread_url).await;
        let shared_memory_id = match self.shared_memory.acquire().await {
            Ok(id) => id,
            Err(e) => {
                warn!("Shared memory unavailable: {}", e);
                UNAVAILABLE_MEMORY_ID.to_string()
            }
        };

        let agents: Vec<AgentProfile> = selection
            .in_dispatch_order()
            .into_iter()
            .cloned()
            .collect();
        progress.on_dispatch_start(agents.len(), comments.len());

        let (agent_decisions, comment_classifications) = tokio::join!(
            self.dispatch_agents(&thread_url, &subreddit, &agents, &comments, progress),
            self.classify_comments(&thread_url, &comments, progress),
        );

        let result = ModerationResultBuilder::new()
            .thread_url(thread_url.as_str())
            .detected_subreddit(&subreddit)
            .agent_used(&selection.specialist.subreddit)
            .comment_count(comments.len())
            .shared_memory_id(&shared_memory_id)
            .agent_decisions(agent_decisions)
            .comment_classifications(comment_classifications)
            .build()?;

        if shared_memory_id != UNAVAILABLE_MEMORY_ID
            && let Err(e) = self
                .shared_memory
                .record(&shared_memory_id, &result.agent_decisions)
                .await
        {
            warn!("Failed to record decisions in shared memory: {}", e);
        }

        self.history.append(HistoryEntry::from_result(&result));
        self.audit_log.log(AuditEvent::ModerationCompleted {
            result: result.clone(),
        });

        info!(
            "Final decision for {}: {} ({:.2}, {}/{} valid)",
            result.thread_url,
            result.final_decision.final_decision,
            result.final_decision.confidence,
            result.final_decision.valid_responses,
            result.final_decision.total_agents
        );
        progress.on_dispatch_complete();

        Ok(result)
    }

    async fn fetch_comments(&self, thread_url: &ThreadUrl) -> Arc<Vec<String>> {
        let mut comments = match self.comments.fetch_comments(thread_url).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!("Failed to fetch comments for {}: {}", thread_url, e);
                Vec::new()
            }
        };
        if comments.len() > self.params.max_comments {
            debug!(
                "Capping {} comments to {}",
                comments.len(),
                self.params.max_comments
            );
            comments.truncate(self.params.max_comments);
        }
        Arc::new(comments)
    }

    /// Dispatch every agent in parallel. Output order equals `agents` order.
    async fn dispatch_agents(
        &self,
        thread_url: &ThreadUrl,
        subreddit: &str,
        agents: &[AgentProfile],
        comments: &Arc<Vec<String>>,
        progress: &dyn ModerationProgress,
    ) -> Vec<AgentDecision> {
        let dispatches = agents.iter().map(|profile| {
            let request = AgentRequest {
                thread_url: thread_url.as_str().to_string(),
                detected_subreddit: subreddit.to_string(),
                profile: profile.clone(),
                comments: Arc::clone(comments),
            };
            let port = Arc::clone(&self.agents);
            let timeout = self.params.agent_timeout;

            async move {
                let outcome = with_timeout(timeout, port.moderate(&request)).await;
                let decision = match outcome {
                    Ok(decision) => {
                        info!(
                            "Agent {} decided {} ({:.2})",
                            profile.agent_id, decision.decision, decision.confidence
                        );
                        progress.on_agent_complete(&profile.agent_id, true);
                        decision
                    }
                    Err(e) => {
                        warn!("Agent {} failed: {}", profile.agent_id, e);
                        progress.on_agent_complete(&profile.agent_id, false);
                        AgentDecision::failed(&profile.subreddit, &profile.agent_id, e.to_string())
                    }
                };
                self.audit_log.log(AuditEvent::AgentDecision {
                    thread_url: request.thread_url.clone(),
                    decision: decision.clone(),
                });
                decision
            }
        });

        join_all(dispatches).await
    }

    /// Classify every comment. Always returns exactly one entry per comment.
    async fn classify_comments(
        &self,
        thread_url: &ThreadUrl,
        comments: &[String],
        progress: &dyn ModerationProgress,
    ) -> Vec<CommentClassification> {
        if comments.is_empty() {
            return Vec::new();
        }

        let outcome = with_timeout(
            self.params.classifier_timeout,
            self.classifier.classify(thread_url.as_str(), comments),
        )
        .await;

        let (returned, reason) = match outcome {
            Ok(classifications) => {
                if classifications.len() != comments.len() {
                    warn!(
                        "Classifier returned {} labels for {} comments",
                        classifications.len(),
                        comments.len()
                    );
                }
                progress.on_classification_complete(classifications.len(), true);
                (classifications, "no label returned".to_string())
            }
            Err(e) => {
                warn!("Comment classification failed: {}", e);
                progress.on_classification_complete(0, false);
                (Vec::new(), e.to_string())
            }
        };

        reconcile(comments, returned, &reason, self.params.excerpt_chars)
    }
}

/// Pad missing labels with `ERROR`, drop extras, and shorten texts.
fn reconcile(
    comments: &[String],
    returned: Vec<CommentClassification>,
    reason: &str,
    excerpt_chars: usize,
) -> Vec<CommentClassification> {
    let mut returned = returned.into_iter();
    comments
        .iter()
        .map(|comment| match returned.next() {
            Some(mut classification) => {
                classification.text = excerpt(&classification.text, excerpt_chars);
                classification
            }
            None => CommentClassification::failed(excerpt(comment, excerpt_chars), reason),
        })
        .collect()
}

async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, DispatchError>>,
) -> Result<T, DispatchError> {
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or(Err(DispatchError::Timeout(timeout)))
}
