//! Progress reporting for outreach batch sends

use askedith_application::DeliveryProgress;
use askedith_domain::delivery::{BatchStatus, DeliveryReport};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports batch delivery progress with a progress bar
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
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryProgress for ProgressReporter {
    fn on_batch_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Sending");
        pb.set_message("Starting...");

        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_message_complete(&self, to: &str, success: bool) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), to)
            } else {
                format!("{} {}", "x".red(), to)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self, report: &DeliveryReport) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            let summary = format!("{} of {} sent", report.sent, report.total);
            let summary = match report.status() {
                BatchStatus::AllSent => summary.green(),
                BatchStatus::PartialFailure => summary.yellow(),
                BatchStatus::AllFailed => summary.red(),
            };
            pb.finish_with_message(summary.to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliveryProgress for SimpleProgress {
    fn on_batch_start(&self, total: usize) {
        let noun = if total == 1 { "email" } else { "emails" };
        println!("{} Sending {} {}", "->".cyan(), total, noun);
    }

    fn on_message_complete(&self, to: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), to);
        } else {
            println!("  {} {} (failed)", "x".red(), to);
        }
    }

    fn on_batch_complete(&self, _report: &DeliveryReport) {
        println!();
    }
}
