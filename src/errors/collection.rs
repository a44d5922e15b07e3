use crate::core::Error;
use std::path::PathBuf;

/// Outcome of a batch: every scored item and every failed change.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    pub successes: Vec<T>,
    pub failures: Vec<BatchFailure>,
}

impl<T> Default for BatchResults<T> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResults<T> {
    /// Split per-item results into successes and failures, keeping order.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = Result<T, BatchFailure>>) -> Self {
        let mut results = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(value) => results.successes.push(value),
                Err(failure) => results.failures.push(failure),
            }
        }
        results
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total_count(&self) -> usize {
        self.success_count() + self.failure_count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_count() == 0 {
            return 1.0;
        }
        self.success_count() as f64 / self.total_count() as f64
    }
}

/// A change that could not be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub stage: Stage,
    pub category: &'static str,
    pub error: String,
}

impl BatchFailure {
    pub fn new(path: PathBuf, stage: Stage, error: &Error) -> Self {
        Self {
            path,
            stage,
            category: error.category(),
            error: error.to_string(),
        }
    }

    pub fn discovery(path: PathBuf, error: &Error) -> Self {
        Self::new(path, Stage::Discovery, error)
    }

    pub fn flatten(path: PathBuf, error: &Error) -> Self {
        Self::new(path, Stage::Flatten, error)
    }

    pub fn read_results(path: PathBuf, error: &Error) -> Self {
        Self::new(path, Stage::ReadResults, error)
    }
}

/// Step of the per-change pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Discovery,
    Flatten,
    ReadResults,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "Discover graphs",
            Self::Flatten => "Flatten graph",
            Self::ReadResults => "Read results",
        }
    }
}
