use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str = "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} packages - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Messages go to stderr so the document on stdout stays clean. The
/// traversal progress is drawn with an indicatif bar, created lazily on
/// the first progress update.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        if let Some(bar) = slot.as_ref() {
            return bar.clone();
        }

        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        bar.set_style(style);
        *slot = Some(bar.clone());
        bar
    }

    fn clear_progress_bar(&self) {
        if let Some(bar) = self.progress_bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let bar = self.progress_bar(total);
        bar.set_length(total as u64);
        bar.set_position(current as u64);
        if let Some(message) = message {
            bar.set_message(message.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.clear_progress_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_progress_bar();
        eprintln!("{}", message);
    }
}
