use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

const STAGE_TEMPLATE: &str = "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the rendered report on
/// stdout. Stages are shown with an indicatif bar that keeps ticking while a
/// long scan runs.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            return pb.clone();
        }

        let style = ProgressStyle::default_bar()
            .template(STAGE_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        let pb = ProgressBar::new(total as u64);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(120));
        *pb_option = Some(pb.clone());
        pb
    }

    fn finish(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
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
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }

    fn report_stage(&self, stage: usize, total: usize, message: &str) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_length(total as u64);
        pb.set_position(stage.saturating_sub(1) as u64);
        pb.set_message(message.to_string());
    }

    fn report_warning(&self, message: &str) {
        self.report(&format!("⚠️  {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.finish();
        eprintln!("{}", message);
    }
}
