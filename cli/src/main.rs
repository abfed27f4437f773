//! CLI entrypoint for threadsense
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use threadsense_application::{
    AuditLog, CommentSourcePort, ModerateThreadInput, ModerateThreadUseCase, NoAuditLog,
};
use threadsense_domain::{ConfigIssue, Severity};
use threadsense_infrastructure::{
    BackendProvider, ChatBackend, ConfigLoader, DemoChatBackend, DemoCommentSource, FileConfig,
    InMemoryHistoryStore, InMemorySharedMemory, JsonlAuditLogger, LlmCommentClassifier,
    LlmModerationAgent, OpenAiCompatibleBackend, RedditCommentSource,
};
use threadsense_presentation::{
    ApiOptions, AppState, Cli, Command, ConsoleFormatter, ProgressReporter,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.log_dir_path().as_deref())?;
    info!("Starting threadsense");

    let issues = config.validate();
    report_issues(&issues);
    if ConfigIssue::any_errors(&issues) {
        bail!("configuration has errors; fix them or run with --no-config");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Use `threadsense serve` or `threadsense moderate <URL>`.");
    };

    // === Dependency Injection ===
    let (use_case, backend_name) = build_use_case(&config)?;
    let use_case = Arc::new(use_case);

    match command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("failed to bind {bind}"))?;

            let state = AppState::new(use_case, backend_name).with_options(ApiOptions {
                cors: config.server.cors,
                max_history_items: config.history.retention,
                ..ApiOptions::default()
            });
            threadsense_presentation::serve(listener, state).await?;
        }
        Command::Moderate { thread_url, output } => {
            let input = ModerateThreadInput::new(thread_url);
            let result = if cli.quiet {
                use_case.execute(input).await?
            } else {
                let progress = ProgressReporter::new();
                use_case.execute_with_progress(input, &progress).await?
            };

            let format = output
                .map(threadsense_domain::OutputFormat::from)
                .or(config.output.format)
                .unwrap_or_default();
            println!("{}", ConsoleFormatter::render(&result, format));
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level, plus a daily file when configured.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "threadsense.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

fn build_use_case(config: &FileConfig) -> Result<(ModerateThreadUseCase, String)> {
    let backend_config = &config.backend;
    let (provider, _) = backend_config.parse_provider();
    let timeout = Duration::from_secs(backend_config.request_timeout_secs);

    let (backend, comments): (Arc<dyn ChatBackend>, Arc<dyn CommentSourcePort>) = match provider {
        BackendProvider::Demo => {
            info!("Using demo backend; verdicts are keyword heuristics");
            (
                Arc::new(DemoChatBackend::new()),
                Arc::new(DemoCommentSource::new()),
            )
        }
        BackendProvider::OpenAi => {
            let api_key = backend_config
                .resolve_api_key()
                .context("backend API key is not set")?;
            let backend = OpenAiCompatibleBackend::new(
                backend_config.base_url.clone(),
                api_key,
                backend_config.model.clone(),
                timeout,
            )?
            .with_temperature(backend_config.temperature);
            let source = RedditCommentSource::new(timeout)?
                .with_max_comments(config.moderation.max_comments);
            (Arc::new(backend), Arc::new(source))
        }
    };
    let backend_name = backend.name().to_string();

    let audit_log: Arc<dyn AuditLog> = match config.logging.audit_log_path() {
        Some(path) => match JsonlAuditLogger::new(&path) {
            Some(logger) => {
                info!("Audit log: {}", path.display());
                Arc::new(logger)
            }
            None => {
                warn!("Could not open audit log {}; continuing without", path.display());
                Arc::new(NoAuditLog)
            }
        },
        None => Arc::new(NoAuditLog),
    };

    let roster = config.build_roster()?;
    let use_case = ModerateThreadUseCase::new(
        Arc::new(LlmModerationAgent::new(backend.clone())),
        Arc::new(
            LlmCommentClassifier::new(backend)
                .with_batch_size(config.moderation.classifier_batch_size),
        ),
        comments,
        Arc::new(InMemorySharedMemory::new()),
        Arc::new(roster),
    )
    .with_history(Arc::new(InMemoryHistoryStore::new(config.history.retention)))
    .with_audit_log(audit_log)
    .with_params(config.moderation.to_params());

    Ok((use_case, backend_name))
}
