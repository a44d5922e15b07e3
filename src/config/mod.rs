//! Evaluation configuration (`.untangle-eval.toml`).
//!
//! ```toml
//! graph_filename = "merged_output_wl_1.dot"
//! results_filename = "flexeme.csv"
//! language = "java"
//! follow_links = false
//!
//! [parallel]
//! enabled = true
//! jobs = 8
//! ```
//!
//! Command-line flags override values from the file.

mod loader;
mod parallel;

pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILENAME,
};
pub use parallel::ParallelConfig;

use crate::core::{Error, Result, SourceLanguage};
use crate::flatten::RESULTS_FILENAME;
use serde::{Deserialize, Serialize};

/// Graph file name the untangling tool writes for each change.
pub const DEFAULT_GRAPH_FILENAME: &str = "merged_output_wl_1.dot";

fn default_graph_filename() -> String {
    DEFAULT_GRAPH_FILENAME.to_string()
}

fn default_results_filename() -> String {
    RESULTS_FILENAME.to_string()
}

fn default_language() -> SourceLanguage {
    SourceLanguage::Java
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalConfig {
    #[serde(default = "default_graph_filename")]
    pub graph_filename: String,

    #[serde(default = "default_results_filename")]
    pub results_filename: String,

    /// Language used when marking graphs against a diff.
    #[serde(default = "default_language")]
    pub language: SourceLanguage,

    /// Follow symbolic links while discovering graphs for a batch.
    #[serde(default)]
    pub follow_links: bool,

    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            graph_filename: default_graph_filename(),
            results_filename: default_results_filename(),
            language: default_language(),
            follow_links: false,
            parallel: ParallelConfig::default(),
        }
    }
}

impl EvalConfig {
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("graph_filename", &self.graph_filename),
            ("results_filename", &self.results_filename),
        ] {
            if value.is_empty() || value.contains(['/', '\\']) {
                return Err(Error::Configuration(format!(
                    "{key} must be a plain file name, got {value:?}"
                )));
            }
        }
        if self.graph_filename == self.results_filename {
            return Err(Error::Configuration(
                "graph_filename and results_filename must differ".to_string(),
            ));
        }
        Ok(())
    }
}
