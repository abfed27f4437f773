//! Response parsing for moderation agents and the comment classifier.
//!
//! Pure text handling: no I/O, no normalization side effects. Agent output
//! is free-form LLM text that usually, but not always, contains JSON.
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`parse_agent_verdict`] | one agent reply | decision / confidence / reason |
//! | [`parse_comment_labels`] | one classifier batch reply | one slot per comment |

use super::label::ModerationLabel;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Confidence assumed when a reply names a decision but no number.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Structured fields pulled out of an agent reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVerdict {
    /// Decision in the agent's own spelling
    pub decision: String,
    pub confidence: f64,
    pub reason: String,
}

/// Parse an agent reply.
///
/// Tries JSON first (`{"decision": ..., "confidence": ..., "reason": ...}`,
/// possibly wrapped in prose or a code fence). Free text is accepted only
/// when it names its label unambiguously:
///
/// 1. an explicit `decision: X` / `verdict: X`, or
/// 2. decision keywords that all map to one canonical label, none negated.
///
/// Anything else returns `None`.
///
/// # Examples
///
/// ```
/// use threadsense_domain::moderation::parsing::parse_agent_verdict;
///
/// let v = parse_agent_verdict(r#"{"decision": "CLEAN", "confidence": 0.8}"#).unwrap();
/// assert_eq!(v.decision, "CLEAN");
/// assert_eq!(v.confidence, 0.8);
///
/// let v = parse_agent_verdict("I see no violation here. Verdict: FINE").unwrap();
/// assert_eq!(v.decision, "FINE");
///
/// assert!(parse_agent_verdict("This thread is not a VIOLATION; it is FINE.").is_none());
/// assert!(parse_agent_verdict("no idea").is_none());
/// ```
pub fn parse_agent_verdict(response: &str) -> Option<ParsedVerdict> {
    if let Some(parsed) = extract_json(response, '{', '}').and_then(|v| verdict_from_json(&v)) {
        return Some(parsed);
    }

    let decision = explicit_keyword(response).or_else(|| sole_keyword(response))?;
    Some(ParsedVerdict {
        decision,
        confidence: FALLBACK_CONFIDENCE,
        reason: response.trim().to_string(),
    })
}

/// Parse a classifier reply for a batch of `expected` comments.
///
/// Accepts a JSON array of either bare label strings or objects
/// `{"index": n, "label": "...", "reason": "..."}` (1-based `index`).
/// The returned vector always has `expected` slots; slots the reply did not
/// fill are `None`.
pub fn parse_comment_labels(
    response: &str,
    expected: usize,
) -> Vec<Option<(ModerationLabel, Option<String>)>> {
    let mut slots = vec![None; expected];

    let Some(Value::Array(items)) = extract_json(response, '[', ']') else {
        return slots;
    };

    for (position, item) in items.iter().enumerate() {
        let (index, label, reason) = match item {
            Value::String(label) => (position, label.as_str(), None),
            Value::Object(map) => {
                let Some(label) = map.get("label").and_then(Value::as_str) else {
                    continue;
                };
                let index = map
                    .get("index")
                    .and_then(Value::as_u64)
                    .and_then(|i| (i as usize).checked_sub(1))
                    .unwrap_or(position);
                let reason = map
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (index, label, reason)
            }
            _ => continue,
        };

        if let Some(slot) = slots.get_mut(index)
            && slot.is_none()
        {
            *slot = Some((ModerationLabel::normalize(label), reason));
        }
    }

    slots
}

fn extract_json(response: &str, open: char, close: char) -> Option<Value> {
    let start = response.find(open)?;
    let end = response.rfind(close)?;
    if end < start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

fn verdict_from_json(value: &Value) -> Option<ParsedVerdict> {
    let decision = value.get("decision").and_then(Value::as_str)?.trim().to_string();
    if decision.is_empty() {
        return None;
    }

    let confidence = match value.get("confidence") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .map(|c| if c > 1.0 && c <= 100.0 { c / 100.0 } else { c })
    .unwrap_or(FALLBACK_CONFIDENCE);

    let reason = value
        .get("reason")
        .or_else(|| value.get("reasoning"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(ParsedVerdict {
        decision,
        confidence,
        reason,
    })
}

/// Keyword after `decision:` / `verdict:`. Conflicting labels yield `None`.
fn explicit_keyword(response: &str) -> Option<String> {
    let keywords: Vec<&str> = labelled_pattern()
        .captures_iter(response)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    single_label(&keywords)
}

/// The reply's only label, if every keyword agrees and none is negated.
fn sole_keyword(response: &str) -> Option<String> {
    let mut keywords = Vec::new();
    for m in keyword_pattern().find_iter(response) {
        if is_negated(&response[..m.start()]) {
            return None;
        }
        keywords.push(m.as_str());
    }
    single_label(&keywords)
}

fn single_label(keywords: &[&str]) -> Option<String> {
    let (first, rest) = keywords.split_first()?;
    let label = ModerationLabel::normalize(first);
    rest.iter()
        .all(|k| ModerationLabel::normalize(k) == label)
        .then(|| first.to_ascii_uppercase())
}

const NEGATIONS: &[&str] = &["not", "no", "never", "isn't", "isnt", "without", "nor", "neither"];

/// Whether one of the last three words before a keyword negates it.
fn is_negated(before: &str) -> bool {
    before
        .rsplit(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .take(3)
        .any(|w| NEGATIONS.contains(&w.to_lowercase().as_str()))
}

const KEYWORDS: &str =
    "PLATFORM_VIOLATION|VIOLATION|NEEDS_WARNING|GLOBAL_WARNING|INCONCLUSIVE|CLEAN|FINE|ERROR";

fn keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b(?:{KEYWORDS})\b")).expect("keyword pattern compiles")
    })
}

fn labelled_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r#"(?i)\b(?:decision|verdict)\b[\s*]*[:=][\s*"'`]*({KEYWORDS})\b"#
        ))
        .expect("labelled pattern compiles")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_agent_verdict ====================

    #[test]
    fn test_verdict_plain_json() {
        let v = parse_agent_verdict(
            r#"{"decision": "PLATFORM_VIOLATION", "confidence": 0.93, "reason": "doxxing"}"#,
        )
        .unwrap();
        assert_eq!(v.decision, "PLATFORM_VIOLATION");
        assert_eq!(v.confidence, 0.93);
        assert_eq!(v.reason, "doxxing");
    }

    #[test]
    fn test_verdict_json_in_code_fence() {
        let response = r#"
Here is my assessment:
```json
{"decision": "FINE", "confidence": "0.7", "reasoning": "civil discussion"}
```
"#;
        let v = parse_agent_verdict(response).unwrap();
        assert_eq!(v.decision, "FINE");
        assert_eq!(v.confidence, 0.7);
        assert_eq!(v.reason, "civil discussion");
    }

    #[test]
    fn test_verdict_percentage_confidence() {
        let v = parse_agent_verdict(r#"{"decision": "VIOLATION", "confidence": 85}"#).unwrap();
        assert_eq!(v.confidence, 0.85);
        assert_eq!(v.reason, "");
    }

    #[test]
    fn test_verdict_missing_confidence_uses_fallback() {
        let v = parse_agent_verdict(r#"{"decision": "CLEAN"}"#).unwrap();
        assert_eq!(v.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_verdict_keyword_fallback() {
        let v = parse_agent_verdict("I'd call this a global_warning situation.").unwrap();
        assert_eq!(v.decision, "GLOBAL_WARNING");
        assert_eq!(v.confidence, FALLBACK_CONFIDENCE);
        assert!(v.reason.contains("situation"));
    }

    #[test]
    fn test_explicit_verdict_wins_over_prose() {
        let v = parse_agent_verdict("I see no violation here. Verdict: FINE").unwrap();
        assert_eq!(v.decision, "FINE");

        let v = parse_agent_verdict("Some heat, but **Decision:** `needs_warning`").unwrap();
        assert_eq!(v.decision, "NEEDS_WARNING");
    }

    #[test]
    fn test_conflicting_explicit_verdicts() {
        assert!(parse_agent_verdict("Verdict: FINE. Final decision: VIOLATION").is_none());
        let v = parse_agent_verdict("Decision: CLEAN (verdict: FINE)").unwrap();
        assert_eq!(v.decision, "CLEAN");
    }

    #[test]
    fn test_negated_or_mixed_keywords_unparseable() {
        for reply in [
            "This thread is not a VIOLATION; it is FINE.",
            "No ERROR found, the thread is CLEAN",
            "It isn't a violation.",
            "Could be FINE, could be a VIOLATION.",
        ] {
            assert!(parse_agent_verdict(reply).is_none(), "{reply}");
        }
    }

    #[test]
    fn test_agreeing_keywords_accepted() {
        let v = parse_agent_verdict("CLEAN. Everything here is fine.").unwrap();
        assert_eq!(v.decision, "CLEAN");
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        // "FINED" and "DEFINE" must not be read as FINE
        assert!(parse_agent_verdict("The user was fined; define the rules").is_none());
    }

    #[test]
    fn test_verdict_unparseable() {
        assert!(parse_agent_verdict("").is_none());
        assert!(parse_agent_verdict("{broken json").is_none());
        assert!(parse_agent_verdict(r#"{"decision": ""}"#).is_none());
    }

    // ==================== parse_comment_labels ====================

    #[test]
    fn test_labels_from_strings() {
        let slots = parse_comment_labels(r#"["FINE", "VIOLATION", "CLEAN"]"#, 3);
        let labels: Vec<_> = slots.iter().map(|s| s.as_ref().map(|(l, _)| *l)).collect();
        assert_eq!(
            labels,
            vec![
                Some(ModerationLabel::Fine),
                Some(ModerationLabel::Violation),
                Some(ModerationLabel::Fine),
            ]
        );
    }

    #[test]
    fn test_labels_from_indexed_objects_out_of_order() {
        let response = r#"Sure:
[
  {"index": 2, "label": "NEEDS_WARNING", "reason": "rude"},
  {"index": 1, "label": "FINE"}
]"#;
        let slots = parse_comment_labels(response, 2);
        assert_eq!(slots[0], Some((ModerationLabel::Fine, None)));
        assert_eq!(
            slots[1],
            Some((ModerationLabel::NeedsWarning, Some("rude".to_string())))
        );
    }

    #[test]
    fn test_labels_short_reply_leaves_gaps() {
        let slots = parse_comment_labels(r#"["FINE"]"#, 3);
        assert_eq!(slots.len(), 3);
        assert!(slots[0].is_some());
        assert!(slots[1].is_none());
        assert!(slots[2].is_none());
    }

    #[test]
    fn test_labels_extra_items_ignored() {
        let slots = parse_comment_labels(r#"["FINE", "FINE", "VIOLATION"]"#, 2);
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_labels_unknown_label_is_error() {
        let slots = parse_comment_labels(r#"["SPICY"]"#, 1);
        assert_eq!(slots[0], Some((ModerationLabel::Error, None)));
    }

    #[test]
    fn test_labels_no_json() {
        let slots = parse_comment_labels("I could not classify these.", 2);
        assert_eq!(slots, vec![None, None]);
    }
}
