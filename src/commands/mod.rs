//! CLI command implementations.
//!
//! - **mark**: color a PDG against both sides of a diff
//! - **flatten**: turn an annotated PDG into a per-line results CSV
//! - **score**: Rand Index of one results CSV
//! - **batch**: flatten and score every change below a directory
//! - **init**: write a default configuration file
//!
//! Handlers return `anyhow::Result`; [`exit_code_for`] maps a failure to the
//! process exit status.

pub mod batch;
pub mod flatten;
pub mod init;
pub mod mark;
pub mod score;

pub use batch::{handle_batch, BatchCommand};
pub use flatten::handle_flatten;
pub use init::init_config;
pub use mark::handle_mark;
pub use score::handle_score;

use crate::config::{load_config, load_config_from, EvalConfig};
use crate::core::Error;
use anyhow::Context;
use std::path::Path;

/// Exit status when an upstream artifact is absent.
pub const EXIT_MISSING_ARTIFACT: u8 = 1;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 2;

/// Exit status for a failed command.
///
/// A missing graph or results file anywhere in the error chain maps to
/// [`EXIT_MISSING_ARTIFACT`] so callers can tell "the tool reported a single
/// group" apart from real failures.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    let missing = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(Error::is_missing_artifact);
    if missing {
        EXIT_MISSING_ARTIFACT
    } else {
        EXIT_FAILURE
    }
}

/// Explicit `--config` files must load; otherwise the nearest config is
/// discovered and defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<EvalConfig> {
    match explicit {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_missing_artifact_maps_to_exit_one() {
        let err = anyhow::Error::new(Error::missing_artifact("c1/flexeme.csv"))
            .context("Failed to score c1/flexeme.csv");
        assert_eq!(exit_code_for(&err), EXIT_MISSING_ARTIFACT);
    }

    #[test]
    fn test_other_failures_map_to_exit_two() {
        let err = anyhow::Error::new(Error::UnsupportedLanguage("go".to_string()));
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
        assert_eq!(exit_code_for(&anyhow!("2 change(s) failed")), EXIT_FAILURE);
    }
}
