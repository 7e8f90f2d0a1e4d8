//! Progress reporting module

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for document processing
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the progress bar for a known number of documents.
    pub fn init_documents(&mut self, total: u64) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} docs {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Mark one document as finished.
    pub fn document_completed(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Chunked: {name}"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting.
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}
