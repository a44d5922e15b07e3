//! Graph flattening: expands an annotated PDG into one row per changed line.
//!
//! Only nodes that carry both a change color and a ground-truth `community`
//! are scorable. Changed nodes without a community are excluded from the
//! table (and counted in [`FlattenStats::unlabeled_nodes`]); untangling
//! results on unlabeled, real-world changes therefore cannot be scored here.

pub mod table;

pub use table::{FlattenedRow, FlexemeTable};

use crate::core::{ChangeColor, ChangeKind, Error, Result};
use crate::graph::dot::read_dot;
use crate::graph::{Pdg, PdgNode};
use std::path::{Path, PathBuf};

/// Default name of the per-change results file.
pub const RESULTS_FILENAME: &str = "flexeme.csv";

/// Separator between the tool's group index and the rest of a node label.
pub const GROUP_SEPARATOR: char = ':';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Nodes carrying an added or removed color.
    pub colored_nodes: usize,
    /// Colored nodes skipped for lack of a ground-truth community.
    pub unlabeled_nodes: usize,
    /// Colored nodes skipped because their span did not parse.
    pub malformed_spans: usize,
    /// Rows dropped as exact duplicates.
    pub duplicate_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub table: FlexemeTable,
    pub stats: FlattenStats,
}

/// What [`translate_pdg_to_csv`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum FlattenOutcome {
    Written { path: PathBuf, rows: usize, stats: FlattenStats },
    /// The results file already existed and was left untouched.
    AlreadyComputed { path: PathBuf },
}

/// Flatten an annotated PDG into a de-duplicated results table.
pub fn flatten(pdg: &Pdg) -> Result<Flattened> {
    let mut stats = FlattenStats::default();
    let mut rows = Vec::new();

    for node in pdg.nodes() {
        let Some(kind) = change_kind(node)? else {
            continue;
        };
        stats.colored_nodes += 1;

        let Some(community) = node.community() else {
            log::debug!("Node {} is changed but has no community", node.id());
            stats.unlabeled_nodes += 1;
            continue;
        };
        let truth_group = parse_community(node.id(), community)?;

        let label = node.label().ok_or_else(|| Error::MissingAttribute {
            node: node.id().to_string(),
            attribute: "label",
        })?;
        let tool_group = parse_tool_group(node.id(), label)?;

        let Some(span) = node.span() else {
            log::warn!(
                "Skipping node {} with malformed span {:?}",
                node.id(),
                node.raw_span()
            );
            stats.malformed_spans += 1;
            continue;
        };

        let file = node.file_path().ok_or_else(|| Error::MissingAttribute {
            node: node.id().to_string(),
            attribute: "cluster",
        })?;

        rows.extend(span.lines().map(|line| match kind {
            ChangeKind::Added => FlattenedRow::added(file.as_str(), line, tool_group, truth_group),
            ChangeKind::Removed => {
                FlattenedRow::removed(file.as_str(), line, tool_group, truth_group)
            }
        }));
    }

    let emitted = rows.len();
    let table = FlexemeTable::from_rows(rows);
    stats.duplicate_rows = emitted - table.len();

    Ok(Flattened { table, stats })
}

/// Direction of a node in the table, `None` for nodes outside the diff.
fn change_kind(node: &PdgNode) -> Result<Option<ChangeKind>> {
    let Some(color) = node.color() else {
        return Ok(None);
    };
    match ChangeColor::from_attribute(color) {
        Some(ChangeColor::Anchor) => Ok(None),
        Some(color) => Ok(color.change_kind()),
        None => Err(Error::UnsupportedColor {
            node: node.id().to_string(),
            color: color.to_string(),
        }),
    }
}

fn parse_community(node: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .trim_matches('"')
        .parse()
        .map_err(|_| Error::InvalidCommunity {
            node: node.to_string(),
            value: raw.to_string(),
        })
}

/// Group index the untangling tool put in front of a label (`"3:x = y"` -> 3).
pub fn parse_tool_group(node: &str, label: &str) -> Result<i64> {
    let malformed = || Error::MalformedLabel {
        node: node.to_string(),
        label: label.to_string(),
    };
    let (group, _) = label.split_once(GROUP_SEPARATOR).ok_or_else(malformed)?;
    group.replace('"', "").trim().parse().map_err(|_| malformed())
}

/// Results file location for a graph: a sibling file named `results_filename`.
pub fn results_path_for(pdg_path: &Path, results_filename: &str) -> PathBuf {
    pdg_path
        .parent()
        .map(|dir| dir.join(results_filename))
        .unwrap_or_else(|| PathBuf::from(results_filename))
}

/// Read a graph, flatten it and write the results CSV.
///
/// Idempotent: if `csv_path` exists nothing is read or written. A missing
/// graph is reported as [`Error::MissingArtifact`] and leaves no output, even
/// when a results file from an earlier run is present.
pub fn translate_pdg_to_csv(pdg_path: &Path, csv_path: &Path) -> Result<FlattenOutcome> {
    if !pdg_path.exists() {
        return Err(Error::missing_artifact(pdg_path));
    }
    if csv_path.exists() {
        log::info!("{} already exists, skipping", csv_path.display());
        return Ok(FlattenOutcome::AlreadyComputed {
            path: csv_path.to_path_buf(),
        });
    }

    let pdg = read_dot(pdg_path)?;
    let Flattened { table, stats } = flatten(&pdg)?;

    if table.is_empty() {
        log::warn!("No grouped changes found in {}", pdg_path.display());
        eprintln!(
            "No results generated for {}. Verify decomposition results and paths.",
            csv_path.display()
        );
    }
    if stats.unlabeled_nodes > 0 {
        log::info!(
            "{}: {} changed node(s) without ground truth excluded",
            pdg_path.display(),
            stats.unlabeled_nodes
        );
    }

    table.write(csv_path)?;
    Ok(FlattenOutcome::Written {
        path: csv_path.to_path_buf(),
        rows: table.len(),
        stats,
    })
}
