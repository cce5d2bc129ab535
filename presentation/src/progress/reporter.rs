//! Progress reporting while replicas run

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use score_application::ProgressNotifier;
use std::sync::Mutex;

/// Reports replica progress with a progress bar on stderr
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn status(completed: usize, success: bool) -> String {
        if success {
            format!("{} replica {}", "v".green(), completed)
        } else {
            format!("{} replica {}", "x".red(), completed)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_replicas_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Analysing");
        pb.set_message("Asking the oracle...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_replica_complete(&self, completed: usize, _total: usize, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::status(completed, success));
            pb.inc(1);
        }
    }

    fn on_replicas_finished(&self, succeeded: usize, total: usize) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            let summary = format!("{}/{} replicas answered", succeeded, total);
            if succeeded == 0 {
                pb.abandon_with_message(summary.red().to_string());
            } else {
                pb.finish_with_message(summary.green().to_string());
            }
        }
    }
}

/// Plain line-per-event progress for non-interactive output
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_replicas_start(&self, total: usize) {
        eprintln!("{} {} ({} replicas)", "->".cyan(), "Analysing".bold(), total);
    }

    fn on_replica_complete(&self, completed: usize, total: usize, success: bool) {
        if success {
            eprintln!("  {} {}/{}", "v".green(), completed, total);
        } else {
            eprintln!("  {} {}/{} (failed)", "x".red(), completed, total);
        }
    }

    fn on_replicas_finished(&self, succeeded: usize, total: usize) {
        eprintln!("  {} of {} succeeded", succeeded, total);
    }
}
