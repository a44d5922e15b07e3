//! Grouping scorer: Rand Index between the tool grouping and the ground truth.

pub mod records;

pub use records::{ScoreRecord, ScoresFile, SCORES_FILENAME};

use crate::flatten::FlexemeTable;
use std::collections::HashMap;
use std::hash::Hash;

/// Rand Index between two labelings of the same items.
///
/// The fraction of unordered item pairs on which both partitions agree, i.e.
/// both put the pair in one group or both split it. Label values themselves
/// are irrelevant; only the induced partitions are compared.
///
/// With fewer than two items there is no pair to disagree on and the score
/// is 1.0.
///
/// # Panics
///
/// Panics if the two labelings have different lengths.
pub fn rand_index<A, B>(truth: &[A], predicted: &[B]) -> f64
where
    A: Eq + Hash,
    B: Eq + Hash,
{
    assert_eq!(
        truth.len(),
        predicted.len(),
        "labelings must cover the same items"
    );

    let n = truth.len() as u64;
    if n < 2 {
        return 1.0;
    }

    let mut contingency: HashMap<(&A, &B), u64> = HashMap::new();
    let mut truth_sizes: HashMap<&A, u64> = HashMap::new();
    let mut predicted_sizes: HashMap<&B, u64> = HashMap::new();
    for (t, p) in truth.iter().zip(predicted) {
        *contingency.entry((t, p)).or_insert(0) += 1;
        *truth_sizes.entry(t).or_insert(0) += 1;
        *predicted_sizes.entry(p).or_insert(0) += 1;
    }

    let together_in_both: u64 = contingency.values().map(|&c| pairs(c)).sum();
    let together_in_truth: u64 = truth_sizes.values().map(|&c| pairs(c)).sum();
    let together_in_predicted: u64 = predicted_sizes.values().map(|&c| pairs(c)).sum();
    let total = pairs(n);

    let apart_in_both = total + together_in_both - together_in_truth - together_in_predicted;
    (together_in_both + apart_in_both) as f64 / total as f64
}

fn pairs(n: u64) -> u64 {
    n * n.saturating_sub(1) / 2
}

/// Rand Index of one flattened results table.
pub fn score_table(table: &FlexemeTable) -> f64 {
    rand_index(&table.truth_groups(), &table.tool_groups())
}
