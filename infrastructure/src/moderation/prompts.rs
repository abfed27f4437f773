//! Prompt templates for moderation agents and the comment classifier
//!
//! Both prompts list comments under [`COMMENTS_HEADER`] as `[n] text`
//! lines, 1-based. The demo backend reads the same layout back.

use threadsense_domain::{AgentProfile, AgentScope, excerpt};

/// Marks the start of the numbered comment list in a user prompt
pub const COMMENTS_HEADER: &str = "### COMMENTS";

/// Appears in the classifier's system prompt and nowhere else
pub const CLASSIFIER_ROLE: &str = "comment classifier";

/// Appears in the platform agent's system prompt and nowhere else
pub const PLATFORM_ROLE: &str = "sitewide content policy";

pub fn agent_system(profile: &AgentProfile) -> String {
    match profile.scope {
        AgentScope::Subreddit => format!(
            "You are the moderation agent for r/{sub}. You know the rules and culture of \
             r/{sub} and closely related communities.\n\
             Judge the thread as a whole and answer with a single JSON object:\n\
             {{\"decision\": \"VIOLATION\" | \"NEEDS_WARNING\" | \"FINE\", \
             \"confidence\": <number between 0 and 1>, \"reason\": \"<one sentence>\"}}\n\
             Use VIOLATION for content that breaks community rules, NEEDS_WARNING for \
             heated or borderline content, FINE otherwise. Output only the JSON object.",
            sub = profile.subreddit
        ),
        AgentScope::Platform => format!(
            "You are the {PLATFORM_ROLE} agent for Reddit. Ignore community-specific \
             rules; only judge harassment, threats, hate, doxxing, spam and other \
             sitewide violations.\n\
             Answer with a single JSON object:\n\
             {{\"decision\": \"PLATFORM_VIOLATION\" | \"GLOBAL_WARNING\" | \"CLEAN\", \
             \"confidence\": <number between 0 and 1>, \"reason\": \"<one sentence>\"}}\n\
             Output only the JSON object."
        ),
    }
}

pub fn agent_user(
    thread_url: &str,
    subreddit: &str,
    comments: &[String],
    comment_chars: usize,
) -> String {
    format!(
        "Thread: {thread_url}\nSubreddit: r/{subreddit}\nComments: {}\n\n{}",
        comments.len(),
        numbered(comments, comment_chars)
    )
}

pub fn classifier_system() -> String {
    format!(
        "You are a {CLASSIFIER_ROLE} for Reddit. Label every numbered comment as \
         VIOLATION, NEEDS_WARNING or FINE.\n\
         Answer with a JSON array containing one object per comment, in order:\n\
         [{{\"index\": 1, \"label\": \"FINE\", \"reason\": \"<short reason>\"}}, ...]\n\
         Output only the JSON array."
    )
}

pub fn classifier_user(thread_url: &str, comments: &[String], comment_chars: usize) -> String {
    format!(
        "Thread: {thread_url}\nLabel all {} comments.\n\n{}",
        comments.len(),
        numbered(comments, comment_chars)
    )
}

fn numbered(comments: &[String], comment_chars: usize) -> String {
    let mut out = String::from(COMMENTS_HEADER);
    for (i, comment) in comments.iter().enumerate() {
        // Keep one comment per line so the numbering stays unambiguous
        let flat = excerpt(comment, comment_chars).replace(['\n', '\r'], " ");
        out.push_str(&format!("\n[{}] {}", i + 1, flat));
    }
    out
}

/// Read back the numbered comments of a prompt built here.
pub fn parse_numbered(prompt: &str) -> Vec<String> {
    let Some((_, list)) = prompt.split_once(COMMENTS_HEADER) else {
        return Vec::new();
    };
    list.lines()
        .filter_map(|line| {
            let rest = line.strip_prefix('[')?;
            let (index, text) = rest.split_once("] ")?;
            index.parse::<usize>().ok()?;
            Some(text.to_string())
        })
        .collect()
}
