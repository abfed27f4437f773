//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for moderation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Final decision, every agent decision and every comment label
    Full,
    /// Final decision and breakdown only
    Summary,
    /// JSON output (same body as the HTTP API)
    Json,
}

impl From<OutputFormat> for threadsense_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for threadsense
#[derive(Parser, Debug)]
#[command(name = "threadsense")]
#[command(author, version, about = "Multi-agent moderation verdicts for Reddit threads")]
#[command(long_about = r#"
threadsense asks several moderation agents to judge a Reddit thread and
merges their answers into one verdict.

One subreddit-specialized agent and every platform-wide agent judge the
thread; their verdicts escalate to the most severe label
(VIOLATION > NEEDS_WARNING > FINE). Each comment is also labelled on its own.

Configuration files are loaded from (in priority order):
1. THREADSENSE_* environment variables (e.g. THREADSENSE_SERVER__BIND)
2. --config <path>           Explicit config file
3. ./threadsense.toml        Project-level config
4. ~/.config/threadsense/config.toml   Global config

Example:
  threadsense serve --bind 0.0.0.0:8000
  threadsense moderate https://www.reddit.com/r/science/comments/abc123/title/
  threadsense moderate -o json https://www.reddit.com/r/worldnews/comments/x/y/
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Moderate one thread and print the verdict
    Moderate {
        /// Reddit thread URL
        thread_url: String,

        /// Output format (overrides output.format)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moderate() {
        let cli = Cli::parse_from([
            "threadsense",
            "-vv",
            "moderate",
            "-o",
            "json",
            "https://www.reddit.com/r/science/comments/a/b/",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Some(Command::Moderate {
                thread_url: "https://www.reddit.com/r/science/comments/a/b/".to_string(),
                output: Some(OutputFormat::Json),
            })
        );
    }

    #[test]
    fn test_parse_serve_with_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "threadsense",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--no-config",
        ]);
        assert!(cli.no_config);
        assert_eq!(
            cli.command,
            Some(Command::Serve {
                bind: Some("0.0.0.0:9000".to_string())
            })
        );
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::parse_from(["threadsense", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_output_format_conversion() {
        let format: threadsense_domain::OutputFormat = OutputFormat::Summary.into();
        assert_eq!(format, threadsense_domain::OutputFormat::Summary);
    }
}
