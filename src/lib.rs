//! Line-level evaluation of commit untangling tools.
//!
//! An untangling tool splits a tangled commit into groups and reports them
//! as a program dependence graph (PDG). This crate aligns the PDG with the
//! commit diff ([`align`]), flattens the annotated graph into one row per
//! changed line ([`flatten`]) and scores the tool's grouping against the
//! ground truth with the Rand Index ([`score`]). [`batch`] runs the last two
//! stages over a whole tree of results.

// Export modules for library usage
pub mod align;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod diff;
pub mod errors;
pub mod flatten;
pub mod graph;
pub mod io;
pub mod progress;
pub mod score;

pub use crate::align::{mark_all, mark_nodes, mark_pdg_nodes};
pub use crate::batch::{run_batch, BatchOptions, BatchReport};
pub use crate::config::EvalConfig;
pub use crate::core::{ChangeColor, ChangeKind, Error, Result, SourceLanguage};
pub use crate::diff::{parse_unified_diff, DiffEntry, DiffMarker};
pub use crate::flatten::{flatten, translate_pdg_to_csv, FlattenedRow, FlexemeTable};
pub use crate::graph::dot::{parse_dot, read_dot, to_dot, write_dot};
pub use crate::graph::{LineSpan, Pdg, PdgNode};
pub use crate::score::{rand_index, score_table, ScoreRecord, ScoresFile};
