use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use poto_core::pipeline::{PrepareStage, ProgressReporter};
use tracing::debug;

/// Progress bar for the copy stage. Other stages are short and may prompt,
/// they only log.
#[derive(Default)]
pub struct CopyProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl CopyProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for CopyProgress {
    fn begin_stage(&self, stage: PrepareStage, total_items: Option<usize>) {
        debug!("{stage}");
        let (PrepareStage::Copying, Some(total)) = (stage, total_items) else {
            return;
        };

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{msg:16} [{bar:40}] {pos}/{len}")
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(stage.to_string());
        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn advance(&self, items_done: usize) {
        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                pb.set_position(items_done as u64);
            }
        }
    }

    fn finish_stage(&self) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_with_message("Done");
            }
        }
    }
}
