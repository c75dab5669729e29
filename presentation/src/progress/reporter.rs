//! Spinner shown while a round is being generated

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Reports progress on stderr; silent when disabled
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// `enabled = false` for `--quiet` and JSON output
    pub fn new(enabled: bool) -> Self {
        Self {
            bar: enabled.then(ProgressBar::new_spinner),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn start(&self, message: impl Into<String>) {
        if let Some(bar) = &self.bar {
            bar.set_style(Self::spinner_style());
            bar.set_message(message.into());
            bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
