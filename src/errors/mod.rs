//! Failure accumulation for batch evaluation.
//!
//! Every change in a batch is processed independently. Instead of stopping
//! at the first failing change, successes and failures are collected and the
//! failures are reported together once the batch is done.

pub mod collection;
pub mod reporting;
pub mod summary;

pub use collection::{BatchFailure, BatchResults, Stage};
pub use reporting::report_completion_summary;
pub use summary::ErrorSummary;
