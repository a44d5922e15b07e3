use crate::config::EvalConfig;
use crate::flatten::{results_path_for, translate_pdg_to_csv, FlattenOutcome};
use anyhow::Result;
use std::path::Path;

pub fn handle_flatten(pdg_path: &Path, output: Option<&Path>, config: &EvalConfig) -> Result<()> {
    let csv_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| results_path_for(pdg_path, &config.results_filename));

    match translate_pdg_to_csv(pdg_path, &csv_path) {
        Ok(FlattenOutcome::Written { path, rows, stats }) => {
            log::debug!("Flatten statistics: {:?}", stats);
            println!("Wrote {} row(s) to {}", rows, path.display());
            Ok(())
        }
        Ok(FlattenOutcome::AlreadyComputed { path }) => {
            println!("{} already exists, nothing to do", path.display());
            Ok(())
        }
        Err(e) if e.is_missing_artifact() => {
            // No graph means the tool found a single group; no CSV is created.
            eprintln!("PDG not found, skipping creation of CSV file");
            Err(e.into())
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Failed to flatten {}", pdg_path.display()))),
    }
}
