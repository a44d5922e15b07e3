use super::collection::{BatchFailure, Stage};
use std::collections::BTreeMap;
use std::path::PathBuf;

const EXAMPLES_PER_CATEGORY: usize = 3;

/// Failures of a batch grouped by stage and by error category.
#[derive(Debug)]
pub struct ErrorSummary {
    pub total: usize,
    pub by_stage: BTreeMap<Stage, usize>,
    pub by_category: BTreeMap<&'static str, Vec<PathBuf>>,
}

impl ErrorSummary {
    pub fn from_failures(failures: &[BatchFailure]) -> Self {
        let mut by_stage = BTreeMap::new();
        let mut by_category: BTreeMap<&'static str, Vec<PathBuf>> = BTreeMap::new();
        for failure in failures {
            *by_stage.entry(failure.stage).or_insert(0) += 1;
            by_category
                .entry(failure.category)
                .or_default()
                .push(failure.path.clone());
        }

        Self {
            total: failures.len(),
            by_stage,
            by_category,
        }
    }

    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("\nFailure breakdown:\n");
        for (stage, count) in &self.by_stage {
            report.push_str(&format!("  {}: {} change(s)\n", stage.as_str(), count));
        }

        report.push_str("\nError categories:\n");
        for (category, paths) in &self.by_category {
            report.push_str(&format!("  {}: {} change(s)\n", category, paths.len()));

            for path in paths.iter().take(EXAMPLES_PER_CATEGORY) {
                report.push_str(&format!("    - {}\n", path.display()));
            }

            if paths.len() > EXAMPLES_PER_CATEGORY {
                report.push_str(&format!(
                    "    ... and {} more\n",
                    paths.len() - EXAMPLES_PER_CATEGORY
                ));
            }
        }

        report
    }
}
