//! Console output formatter for moderation results

use super::style::LabelStyle;
use colored::Colorize;
use threadsense_domain::{
    ModerationLabel, ModerationResult, OutputFormat, VerdictBreakdown, excerpt,
};

const COMMENT_PREVIEW_CHARS: usize = 100;

/// Formats moderation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn render(result: &ModerationResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Summary => Self::format_summary(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result
    pub fn format(result: &ModerationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Moderation Verdict"));
        output.push('\n');
        output.push_str(&Self::thread_block(result));
        output.push_str(&Self::verdict_block(result));

        output.push_str(&Self::section_header("Agent Decisions"));
        for decision in &result.agent_decisions {
            let label = decision.label();
            let style = LabelStyle::of(label);
            let title = format!("── {} ({}) ──", decision.subreddit, decision.agent_id);
            output.push_str(&format!(
                "\n{}\n{}  {} {:.2}  {} {}\n",
                title.color(style.color).bold(),
                style.badge(label),
                "confidence".dimmed(),
                decision.confidence,
                "raw".dimmed(),
                decision.decision
            ));
            if !decision.reason.is_empty() {
                output.push_str(&format!("{}\n", decision.reason));
            }
        }

        if !result.comment_classifications.is_empty() {
            output.push_str(&Self::section_header("Comments"));
            for (i, comment) in result.comment_classifications.iter().enumerate() {
                output.push_str(&format!(
                    "{:>4}. {:<18} {}\n",
                    i + 1,
                    LabelStyle::of(comment.label).badge(comment.label).to_string(),
                    excerpt(&comment.text, COMMENT_PREVIEW_CHARS)
                ));
                if let Some(reason) = &comment.reason {
                    output.push_str(&format!("      {}\n", reason.dimmed()));
                }
            }
        }

        output.push_str(&Self::footer(result));
        output
    }

    /// Format as JSON (the HTTP response body)
    pub fn format_json(result: &ModerationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Final decision and breakdown only
    pub fn format_summary(result: &ModerationResult) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", "=== Moderation Verdict ===".cyan().bold()));
        output.push_str(&Self::thread_block(result));
        output.push_str(&Self::verdict_block(result));
        output
    }

    fn thread_block(result: &ModerationResult) -> String {
        format!(
            "{} {}\n{} r/{}  {} {}\n{} {}\n",
            "Thread:".cyan().bold(),
            result.thread_url,
            "Subreddit:".cyan().bold(),
            result.detected_subreddit,
            "Agent:".cyan().bold(),
            result.agent_used,
            "Comments:".cyan().bold(),
            result.comment_count
        )
    }

    fn verdict_block(result: &ModerationResult) -> String {
        let fd = &result.final_decision;
        let style = LabelStyle::of(fd.final_decision);
        format!(
            "\n{}  {}  {} {:.2}  {} {}/{}\n{} {}\n",
            style.badge(fd.final_decision),
            style.title.color(style.color),
            "confidence".dimmed(),
            fd.confidence,
            "agents".dimmed(),
            fd.valid_responses,
            fd.total_agents,
            "Breakdown:".cyan().bold(),
            Self::breakdown_line(&fd.verdict_breakdown)
        )
    }

    fn breakdown_line(breakdown: &VerdictBreakdown) -> String {
        ModerationLabel::ALL
            .iter()
            .map(|label| {
                let style = LabelStyle::of(*label);
                format!("{} {}", label.as_str(), breakdown.count(*label))
                    .color(style.color)
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer(result: &ModerationResult) -> String {
        format!(
            "\n{} {}\n{}\n",
            "shared memory:".dimmed(),
            result.shared_memory_id.dimmed(),
            "=".repeat(60).cyan()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadsense_domain::{AgentDecision, CommentClassification, ModerationResultBuilder};

    fn sample() -> ModerationResult {
        ModerationResultBuilder::new()
            .thread_url("https://www.reddit.com/r/science/comments/abc/t/")
            .detected_subreddit("science")
            .agent_used("science")
            .comment_count(2)
            .shared_memory_id("block-7")
            .agent_decisions(vec![
                AgentDecision::new("science", "agent-science", "CLEAN", 0.8, "on topic"),
                AgentDecision::new(
                    "reddit",
                    "agent-reddit-platform",
                    "GLOBAL_WARNING",
                    0.6,
                    "heated",
                ),
            ])
            .comment_classifications(vec![
                CommentClassification::new("great paper", ModerationLabel::Fine),
                CommentClassification::new("you are an idiot", ModerationLabel::NeedsWarning)
                    .with_reason("insult"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_full_lists_agents_and_comments() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&sample());
        assert!(text.contains("agent-science"));
        assert!(text.contains("agent-reddit-platform"));
        assert!(text.contains("GLOBAL_WARNING"));
        assert!(text.contains("you are an idiot"));
        assert!(text.contains("insult"));
        assert!(text.contains("block-7"));
    }

    #[test]
    fn test_summary_has_verdict_and_breakdown_only() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_summary(&sample());
        assert!(text.contains("NEEDS_WARNING"));
        assert!(text.contains("FINE 1"));
        assert!(text.contains("NEEDS_WARNING 1"));
        assert!(text.contains("2/2"));
        assert!(!text.contains("you are an idiot"));
    }

    #[test]
    fn test_json_matches_wire_names() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&sample())).unwrap();
        assert_eq!(json["final_decision"]["final_decision"], "NEEDS_WARNING");
        assert_eq!(json["comment_count"], 2);
        assert_eq!(json["final_decision"]["verdict_breakdown"]["FINE"], 1);
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let result = sample();
        assert_eq!(
            ConsoleFormatter::render(&result, OutputFormat::Json),
            ConsoleFormatter::format_json(&result)
        );
    }
}
