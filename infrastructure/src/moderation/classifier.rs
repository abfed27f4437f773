//! Comment classifier backed by a chat model

use super::prompts;
use crate::chat::{ChatBackend, ChatMessage};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use threadsense_application::{CommentClassifierPort, DispatchError};
use threadsense_domain::{CommentClassification, parse_comment_labels};
use tracing::{debug, warn};

/// Characters of each comment sent to the classifier
const CLASSIFIER_COMMENT_CHARS: usize = 500;

/// Adapter from [`CommentClassifierPort`] to a [`ChatBackend`]
///
/// Comments are sent in numbered batches, at most `concurrency` requests in
/// flight. Results keep input order. A comment the reply did not label, or
/// a batch whose request failed, gets an `ERROR` classification; the call
/// only fails when every batch failed.
pub struct LlmCommentClassifier {
    backend: Arc<dyn ChatBackend>,
    batch_size: usize,
    concurrency: usize,
}

impl LlmCommentClassifier {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            batch_size: 25,
            concurrency: 4,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn classify_batch(
        &self,
        thread_url: &str,
        batch: &[String],
    ) -> Result<Vec<CommentClassification>, DispatchError> {
        let messages = [
            ChatMessage::system(prompts::classifier_system()),
            ChatMessage::user(prompts::classifier_user(
                thread_url,
                batch,
                CLASSIFIER_COMMENT_CHARS,
            )),
        ];
        let max_tokens = 40 * batch.len() as u32 + 100;
        let reply = self.backend.complete(&messages, max_tokens).await?;
        debug!("Classifier replied for {} comments: {}", batch.len(), reply);

        Ok(parse_comment_labels(&reply, batch.len())
            .into_iter()
            .zip(batch)
            .map(|(slot, text)| match slot {
                Some((label, reason)) => {
                    let classification = CommentClassification::new(text.clone(), label);
                    match reason {
                        Some(reason) => classification.with_reason(reason),
                        None => classification,
                    }
                }
                None => CommentClassification::failed(text.clone(), "no label returned"),
            })
            .collect())
    }
}

#[async_trait]
impl CommentClassifierPort for LlmCommentClassifier {
    async fn classify(
        &self,
        thread_url: &str,
        comments: &[String],
    ) -> Result<Vec<CommentClassification>, DispatchError> {
        let batches: Vec<&[String]> = comments.chunks(self.batch_size).collect();
        let futures: Vec<_> = batches
            .iter()
            .copied()
            .map(|batch| async move { (batch, self.classify_batch(thread_url, batch).await) })
            .collect();
        let outcomes: Vec<_> = stream::iter(futures)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut first_error = None;
        let mut failed_batches = 0;
        let mut classifications = Vec::with_capacity(comments.len());

        for (batch, outcome) in outcomes {
            match outcome {
                Ok(labels) => classifications.extend(labels),
                Err(e) => {
                    warn!("Classifier batch of {} failed: {}", batch.len(), e);
                    failed_batches += 1;
                    classifications.extend(
                        batch
                            .iter()
                            .map(|text| CommentClassification::failed(text.clone(), e.to_string())),
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if failed_batches == batches.len() => Err(e),
            _ => Ok(classifications),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::DemoChatBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use threadsense_domain::ModerationLabel;

    /// Labels every comment FINE, except that request number `fail_on` fails
    struct CountingBackend {
        calls: AtomicUsize,
        fail_on: Option<usize>,
        short_reply: bool,
    }

    #[async_trait]
    impl ChatBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        async fn complete(
            &self,
            messages: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, DispatchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(call) {
                return Err(DispatchError::Transport("reset".into()));
            }
            let n = prompts::parse_numbered(&messages[1].content).len();
            let n = if self.short_reply { n - 1 } else { n };
            Ok(serde_json::to_string(&vec!["FINE"; n]).unwrap())
        }
    }

    fn comments(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    fn backend(fail_on: Option<usize>, short_reply: bool) -> Arc<CountingBackend> {
        Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
            fail_on,
            short_reply,
        })
    }

    #[tokio::test]
    async fn test_batches_preserve_order() {
        let backend = backend(None, false);
        let classifier = LlmCommentClassifier::new(backend.clone()).with_batch_size(3);

        let out = classifier.classify("u", &comments(7)).await.unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
        let texts: Vec<_> = out.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["c0", "c1", "c2", "c3", "c4", "c5", "c6"]);
        assert!(out.iter().all(|c| c.label == ModerationLabel::Fine));
    }

    #[tokio::test]
    async fn test_short_reply_fills_error() {
        let classifier = LlmCommentClassifier::new(backend(None, true)).with_batch_size(10);
        let out = classifier.classify("u", &comments(3)).await.unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].label, ModerationLabel::Error);
        assert_eq!(out[2].reason.as_deref(), Some("no label returned"));
    }

    #[tokio::test]
    async fn test_one_failed_batch() {
        let classifier = LlmCommentClassifier::new(backend(Some(0), false))
            .with_batch_size(2)
            .with_concurrency(1);
        let out = classifier.classify("u", &comments(4)).await.unwrap();
        let labels: Vec<_> = out.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                ModerationLabel::Error,
                ModerationLabel::Error,
                ModerationLabel::Fine,
                ModerationLabel::Fine
            ]
        );
    }

    #[tokio::test]
    async fn test_all_batches_failed() {
        let classifier = LlmCommentClassifier::new(backend(Some(0), false));
        let err = classifier.classify("u", &comments(2)).await.unwrap_err();
        assert!(matches!(err, DispatchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_with_demo_backend() {
        let classifier = LlmCommentClassifier::new(Arc::new(DemoChatBackend::new()));
        let out = classifier
            .classify("u", &["thanks!".to_string(), "kys".to_string()])
            .await
            .unwrap();
        assert_eq!(out[0].label, ModerationLabel::Fine);
        assert_eq!(out[1].label, ModerationLabel::Violation);
    }
}
