use crate::batch::{run_batch, BatchOptions};
use crate::cli::configure_thread_pool;
use crate::config::{EvalConfig, ParallelConfig};
use crate::errors::report_completion_summary;
use crate::progress::ProgressConfig;
use anyhow::Result;
use std::path::PathBuf;

/// Arguments of the `batch` subcommand; `None` fields fall back to config.
#[derive(Debug, Clone)]
pub struct BatchCommand {
    pub root: PathBuf,
    pub scores: PathBuf,
    pub graph_name: Option<String>,
    pub jobs: Option<usize>,
    pub no_parallel: bool,
    pub no_progress: bool,
}

impl BatchCommand {
    pub fn options(&self, config: &EvalConfig) -> BatchOptions {
        let mut options = BatchOptions::from_config(config);
        if let Some(name) = &self.graph_name {
            options.graph_filename = name.clone();
        }
        options.parallel = options.parallel && !self.no_parallel;
        options.progress = ProgressConfig::from_env(self.no_progress);
        options
    }

    /// Worker threads for the batch; `--jobs` wins over the config file.
    pub fn jobs(&self, config: &EvalConfig) -> usize {
        ParallelConfig {
            jobs: self.jobs.or(config.parallel.jobs),
            ..config.parallel.clone()
        }
        .effective_jobs()
    }
}

pub fn handle_batch(command: BatchCommand, config: &EvalConfig) -> Result<()> {
    let options = command.options(config);
    if options.parallel {
        let jobs = command.jobs(config);
        log::debug!("Evaluating with {} worker thread(s)", jobs);
        configure_thread_pool(jobs);
    }

    let report = run_batch(&command.root, &command.scores, &options)?;
    report_completion_summary(&report.results, report.skipped.len());

    if let Some(mean) = report.scores.mean() {
        println!(
            "Mean Rand Index over {} change(s): {:.4}",
            report.scores.len(),
            mean
        );
    }
    println!("Scores written to {}", report.scores_path.display());

    if !report.results.is_complete_success() {
        anyhow::bail!(
            "{} change(s) could not be evaluated",
            report.results.failure_count()
        );
    }
    Ok(())
}
