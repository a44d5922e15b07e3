//! Completion reporting for batch evaluation.

use super::collection::BatchResults;
use super::summary::ErrorSummary;

/// Reports completion summary for a batch, including the failure breakdown.
pub fn report_completion_summary<T>(results: &BatchResults<T>, skipped: usize) {
    eprintln!("\nEvaluation Summary:");
    eprintln!("  Changes processed: {}", results.total_count());
    eprintln!("  Scored: {}", results.success_count());
    eprintln!("  Failed: {}", results.failure_count());
    eprintln!("  Skipped (results already present): {}", skipped);
    eprintln!("  Success rate: {:.1}%", results.success_rate() * 100.0);

    if !results.failures.is_empty() {
        let summary = ErrorSummary::from_failures(&results.failures);
        eprintln!("{}", summary.report());
    }
}
