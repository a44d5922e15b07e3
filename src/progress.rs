//! Progress feedback for batch evaluation.
//!
//! Bars are drawn on stderr and only when stderr is a terminal, so piped
//! output and CI logs stay clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const TEMPLATE_BATCH: &str = "📁 {msg} {pos}/{len} changes ({percent}%) - {eta}";

#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// `UNTANGLE_EVAL_QUIET` in the environment also silences progress.
    pub fn from_env(quiet: bool) -> Self {
        Self {
            quiet_mode: quiet || std::env::var("UNTANGLE_EVAL_QUIET").is_ok(),
        }
    }

    pub fn should_show_progress(&self) -> bool {
        !self.quiet_mode && std::io::stderr().is_terminal()
    }

    /// A bar of `len` steps, hidden when progress should not be shown.
    pub fn create_bar(&self, len: u64, template: &str) -> ProgressBar {
        if !self.should_show_progress() {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ");
        let pb = ProgressBar::new(len);
        pb.set_style(style);
        pb
    }
}
