//! Parallelism configuration for batch evaluation.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel processing of independent changes.
///
/// When enabled, each (graph, results) pair of a batch is processed on
/// rayon's thread pool. Instances share no state, so the only limit is
/// file system throughput.
///
/// # Example
///
/// ```rust
/// use untangle_eval::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     jobs: Some(4),
/// };
/// assert_eq!(config.effective_jobs(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker threads; `None` or `0` uses every available core.
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            jobs: None,
        }
    }
}

impl ParallelConfig {
    pub fn effective_jobs(&self) -> usize {
        match self.jobs {
            Some(jobs) if jobs > 0 => jobs,
            _ => num_cpus(),
        }
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
