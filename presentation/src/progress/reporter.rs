//! Progress reporting for moderation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use threadsense_application::ModerationProgress;

/// Reports dispatch progress with an indicatif bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn dispatch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModerationProgress for ProgressReporter {
    fn on_dispatch_start(&self, agents: usize, comments: usize) {
        // One tick per agent plus one for the classification job
        let pb = ProgressBar::new(agents as u64 + 1);
        pb.set_style(Self::dispatch_style());
        pb.set_prefix("Moderating");
        pb.set_message(format!("{} agents, {} comments", agents, comments));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_agent_complete(&self, agent_id: &str, success: bool) {
        self.with_bar(|pb| {
            let status = if success {
                format!("{} {}", "v".green(), agent_id)
            } else {
                format!("{} {}", "x".red(), agent_id)
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_classification_complete(&self, classified: usize, success: bool) {
        self.with_bar(|pb| {
            let status = if success {
                format!("{} {} comments labelled", "v".green(), classified)
            } else {
                format!("{} classifier failed", "x".red())
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_dispatch_complete(&self) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ModerationProgress for SimpleProgress {
    fn on_dispatch_start(&self, agents: usize, comments: usize) {
        println!(
            "{} {} ({} agents, {} comments)",
            "->".cyan(),
            "Dispatching".bold(),
            agents,
            comments
        );
    }

    fn on_agent_complete(&self, agent_id: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), agent_id);
        } else {
            println!("  {} {} (failed)", "x".red(), agent_id);
        }
    }

    fn on_classification_complete(&self, classified: usize, success: bool) {
        if success {
            println!("  {} classifier ({} comments)", "v".green(), classified);
        } else {
            println!("  {} classifier (failed)", "x".red());
        }
    }

    fn on_dispatch_complete(&self) {
        println!();
    }
}
