use crate::align::mark_all;
use crate::config::EvalConfig;
use crate::core::SourceLanguage;
use crate::diff::parse_unified_diff;
use crate::graph::dot::{read_dot, to_dot, write_dot};
use crate::io::read_artifact;
use anyhow::{Context, Result};
use std::path::Path;

/// Annotate a graph with both sides of a diff and write it as DOT.
pub fn handle_mark(
    pdg_path: &Path,
    diff_path: &Path,
    language: Option<SourceLanguage>,
    output: Option<&Path>,
    config: &EvalConfig,
) -> Result<()> {
    let language = language.unwrap_or(config.language);
    let pdg = read_dot(pdg_path).with_context(|| format!("Failed to read {}", pdg_path.display()))?;
    let diff_text = read_artifact(diff_path)
        .with_context(|| format!("Failed to read {}", diff_path.display()))?;
    let diff = parse_unified_diff(&diff_text)
        .with_context(|| format!("Failed to parse {}", diff_path.display()))?;

    log::info!(
        "Marking {} with {} diff line(s) as {}",
        pdg_path.display(),
        diff.len(),
        language
    );
    let marked = mark_all(&pdg, &diff, language);

    match output {
        Some(path) => write_dot(path, &marked)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", to_dot(&marked)),
    }
    Ok(())
}
