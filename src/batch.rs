//! Batch evaluation over a tree of untangling results.
//!
//! Every folder below the root that holds a graph file is one change. Folders
//! whose results CSV already exists were evaluated by an earlier run and are
//! skipped entirely. The rest are flattened and scored independently, and the
//! scores are collected into a single scores file. Directories that cannot be
//! read during discovery are reported as failures alongside failed changes.

use crate::config::EvalConfig;
use crate::core::Error;
use crate::errors::{BatchFailure, BatchResults};
use crate::flatten::{results_path_for, translate_pdg_to_csv, FlexemeTable};
use crate::io::find_graph_files;
use crate::progress::{ProgressConfig, TEMPLATE_BATCH};
use crate::score::{score_table, ScoreRecord, ScoresFile};
use anyhow::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressIterator};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub graph_filename: String,
    pub results_filename: String,
    pub parallel: bool,
    pub follow_links: bool,
    pub progress: ProgressConfig,
}

impl BatchOptions {
    pub fn from_config(config: &EvalConfig) -> Self {
        Self {
            graph_filename: config.graph_filename.clone(),
            results_filename: config.results_filename.clone(),
            parallel: config.parallel.enabled,
            follow_links: config.follow_links,
            progress: ProgressConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub scores_path: PathBuf,
    pub scores: ScoresFile,
    pub results: BatchResults<ScoreRecord>,
    /// Graphs whose folder already held a results file.
    pub skipped: Vec<PathBuf>,
}

/// Scores files given as relative paths are placed under the batch root.
pub fn resolve_scores_path(root: &Path, scores_path: &Path) -> PathBuf {
    if scores_path.is_absolute() {
        scores_path.to_path_buf()
    } else {
        root.join(scores_path)
    }
}

/// Flatten and score every pending change below `root`, then write the
/// scores file.
///
/// Failures of individual changes and unreadable directories are collected
/// in the report rather than returned; only an unreadable root and the final
/// write abort the batch.
pub fn run_batch(root: &Path, scores_path: &Path, options: &BatchOptions) -> Result<BatchReport> {
    let discovered = find_graph_files(root, &options.graph_filename, options.follow_links)
        .with_context(|| format!("Failed to search {} for graphs", root.display()))?;
    let graphs = discovered.files;
    let unreadable = discovered
        .unreadable
        .into_iter()
        .map(|(path, e)| Err::<ScoreRecord, _>(BatchFailure::discovery(path, &Error::Io(e))));

    let (skipped, pending): (Vec<PathBuf>, Vec<PathBuf>) = graphs
        .into_iter()
        .partition(|graph| results_path_for(graph, &options.results_filename).exists());
    for graph in &skipped {
        log::info!("Results already present for {}, skipping", graph.display());
    }
    log::debug!(
        "Found {} change(s) to evaluate under {} ({} skipped)",
        pending.len(),
        root.display(),
        skipped.len()
    );

    let progress = options
        .progress
        .create_bar(pending.len() as u64, TEMPLATE_BATCH);
    progress.set_message("Scoring");

    let evaluate = |graph: &PathBuf| evaluate_change(graph, &options.results_filename);
    let outcomes: Vec<_> = if options.parallel {
        pending
            .par_iter()
            .progress_with(progress.clone())
            .map(evaluate)
            .collect()
    } else {
        pending
            .iter()
            .progress_with(progress.clone())
            .map(evaluate)
            .collect()
    };
    progress.finish_and_clear();

    let results = BatchResults::from_outcomes(unreadable.chain(outcomes));
    let scores = ScoresFile::from_records(results.successes.iter().cloned());
    let scores_path = resolve_scores_path(root, scores_path);
    scores
        .write(&scores_path)
        .with_context(|| format!("Failed to write {}", scores_path.display()))?;
    log::info!(
        "Wrote {} score(s) to {}",
        scores.len(),
        scores_path.display()
    );

    Ok(BatchReport {
        scores_path,
        scores,
        results,
        skipped,
    })
}

/// Flatten one graph into its results file and score it.
///
/// The score is keyed by the graph path as discovered under the batch root.
pub fn evaluate_change(graph: &Path, results_filename: &str) -> Result<ScoreRecord, BatchFailure> {
    let csv_path = results_path_for(graph, results_filename);
    translate_pdg_to_csv(graph, &csv_path)
        .map_err(|e| BatchFailure::flatten(graph.to_path_buf(), &e))?;
    let table =
        FlexemeTable::read(&csv_path).map_err(|e| BatchFailure::read_results(csv_path.clone(), &e))?;

    let score = score_table(&table);
    log::info!("{}: {}", graph.display(), score);
    Ok(ScoreRecord::new(graph.display().to_string(), score))
}
