//! JSONL audit trail of moderation runs.
//!
//! One line per [`AuditEvent`]. Every record starts with `type`, `seq`,
//! `timestamp` and `thread_url`; the remaining fields depend on the event:
//!
//! | `type` | fields |
//! |--------|--------|
//! | `agent_decision` | `agent_id`, `subreddit`, `decision` (raw), `label`, `confidence`, `reason`, `raw_response` |
//! | `moderation_completed` | `detected_subreddit`, `agent_used`, `final_decision`, `confidence`, `valid_responses`, `total_agents`, `comment_count`, `shared_memory_id`, `verdict_breakdown` |
//!
//! The file is opened in append mode so the trail survives restarts; `seq`
//! restarts at 1 for every process.

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use threadsense_application::{AuditEvent, AuditLog};
use threadsense_domain::{ModerationLabel, VerdictBreakdown, excerpt};
use tracing::warn;

/// Raw agent output kept per record
const RAW_RESPONSE_CHARS: usize = 4000;

#[derive(Serialize)]
struct AuditRecord<'a> {
    #[serde(rename = "type")]
    event_type: &'static str,
    seq: u64,
    timestamp: String,
    thread_url: &'a str,
    #[serde(flatten)]
    body: RecordBody<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RecordBody<'a> {
    Agent {
        agent_id: &'a str,
        subreddit: &'a str,
        decision: &'a str,
        label: ModerationLabel,
        confidence: f64,
        reason: &'a str,
        raw_response: String,
    },
    Completed {
        detected_subreddit: &'a str,
        agent_used: &'a str,
        final_decision: ModerationLabel,
        confidence: f64,
        valid_responses: usize,
        total_agents: usize,
        comment_count: usize,
        shared_memory_id: &'a str,
        verdict_breakdown: &'a VerdictBreakdown,
    },
}

impl<'a> RecordBody<'a> {
    fn from_event(event: &'a AuditEvent) -> Self {
        match event {
            AuditEvent::AgentDecision { decision, .. } => RecordBody::Agent {
                agent_id: &decision.agent_id,
                subreddit: &decision.subreddit,
                decision: &decision.decision,
                label: decision.label(),
                confidence: decision.confidence,
                reason: &decision.reason,
                raw_response: excerpt(&decision.raw_response, RAW_RESPONSE_CHARS),
            },
            AuditEvent::ModerationCompleted { result } => {
                let fd = &result.final_decision;
                RecordBody::Completed {
                    detected_subreddit: &result.detected_subreddit,
                    agent_used: &result.agent_used,
                    final_decision: fd.final_decision,
                    confidence: fd.confidence,
                    valid_responses: fd.valid_responses,
                    total_agents: fd.total_agents,
                    comment_count: result.comment_count,
                    shared_memory_id: &result.shared_memory_id,
                    verdict_breakdown: &fd.verdict_breakdown,
                }
            }
        }
    }
}

/// Append-only JSONL audit logger. Each record is flushed as it is written.
pub struct JsonlAuditLogger {
    file: Mutex<File>,
    path: PathBuf,
    seq: AtomicU64,
}

impl JsonlAuditLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
                seq: AtomicU64::new(0),
            }),
            Err(e) => {
                warn!("Could not open audit log file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(&self, event: &AuditEvent) -> serde_json::Result<String> {
        let record = AuditRecord {
            event_type: event.event_type(),
            seq: self.seq.fetch_add(1, Ordering::Relaxed) + 1,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            thread_url: event.thread_url(),
            body: RecordBody::from_event(event),
        };
        serde_json::to_string(&record)
    }
}

impl AuditLog for JsonlAuditLogger {
    fn log(&self, event: AuditEvent) {
        let line = match self.encode(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not encode {} audit record: {}", event.event_type(), e);
                return;
            }
        };

        // One write per line keeps records whole under O_APPEND
        if let Ok(mut file) = self.file.lock()
            && let Err(e) = file.write_all(format!("{line}\n").as_bytes())
        {
            warn!("Could not write audit record to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadsense_domain::{
        AgentDecision, CommentClassification, ModerationResult, ModerationResultBuilder,
    };

    const THREAD: &str = "https://www.reddit.com/r/science/comments/a/";

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn agent_event(decision: AgentDecision) -> AuditEvent {
        AuditEvent::AgentDecision {
            thread_url: THREAD.to_string(),
            decision,
        }
    }

    fn result() -> ModerationResult {
        ModerationResultBuilder::new()
            .thread_url(THREAD)
            .detected_subreddit("science")
            .agent_used("science")
            .comment_count(1)
            .shared_memory_id("block-1")
            .agent_decisions(vec![AgentDecision::new(
                "science",
                "agent-science",
                "PLATFORM_VIOLATION",
                0.9,
                "doxxing",
            )])
            .comment_classifications(vec![CommentClassification::new(
                "here is their address",
                ModerationLabel::Violation,
            )])
            .build()
            .unwrap()
    }

    #[test]
    fn test_agent_decision_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        logger.log(agent_event(
            AgentDecision::new("reddit", "agent-reddit-platform", "CLEAN", 0.7, "civil")
                .with_raw_response("{\"decision\": \"CLEAN\"}"),
        ));

        let records = read_lines(&path);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["type"], "agent_decision");
        assert_eq!(record["seq"], 1);
        assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(record["thread_url"], THREAD);
        assert_eq!(record["agent_id"], "agent-reddit-platform");
        assert_eq!(record["decision"], "CLEAN");
        assert_eq!(record["label"], "FINE");
        assert_eq!(record["raw_response"], "{\"decision\": \"CLEAN\"}");
    }

    #[test]
    fn test_completed_record_is_a_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        logger.log(AuditEvent::ModerationCompleted { result: result() });

        let record = &read_lines(&path)[0];
        assert_eq!(record["type"], "moderation_completed");
        assert_eq!(record["final_decision"], "VIOLATION");
        assert_eq!(record["valid_responses"], 1);
        assert_eq!(record["shared_memory_id"], "block-1");
        assert_eq!(record["verdict_breakdown"]["VIOLATION"], 1);
        // Comment text and agent replies stay out of the summary
        assert!(record.get("comment_classifications").is_none());
        assert!(record.get("agent_decisions").is_none());
    }

    #[test]
    fn test_raw_response_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        let long = "x".repeat(RAW_RESPONSE_CHARS * 2);
        logger.log(agent_event(
            AgentDecision::failed("science", "agent-science", "timeout").with_raw_response(long),
        ));

        let records = read_lines(&path);
        let raw = records[0]["raw_response"].as_str().unwrap();
        assert_eq!(raw.chars().count(), RAW_RESPONSE_CHARS);
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");

        for _ in 0..2 {
            let logger = JsonlAuditLogger::new(&path).unwrap();
            logger.log(AuditEvent::ModerationCompleted { result: result() });
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["seq"], 1);
    }

    #[test]
    fn test_seq_increments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        logger.log(agent_event(AgentDecision::failed("science", "agent-science", "timeout")));
        logger.log(AuditEvent::ModerationCompleted { result: result() });

        let seqs: Vec<_> = read_lines(&path)
            .iter()
            .map(|r| r["seq"].as_u64().unwrap())
            .collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlAuditLogger::new(dir.path()).is_none());
    }
}
