//! Score records and the `scores.csv` aggregate.

use crate::core::{Error, Result};
use crate::io::csv::{escape_field, format_record, parse_records};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const SCORES_FILENAME: &str = "scores.csv";

const HEADER: [&str; 2] = ["file", "score"];

/// Rand Index of one evaluated change, keyed by its graph path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub file: String,
    pub score: f64,
}

impl ScoreRecord {
    pub fn new(file: impl Into<String>, score: f64) -> Self {
        Self {
            file: file.into(),
            score,
        }
    }
}

/// Score records with unique identifiers, sorted by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoresFile {
    records: Vec<ScoreRecord>,
}

impl ScoresFile {
    /// Keeps the first record seen for each identifier.
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut records: Vec<ScoreRecord> = records
            .into_iter()
            .filter(|r| seen.insert(r.file.clone()))
            .collect();
        records.sort_by(|a, b| a.file.cmp(&b.file));
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean score, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        (!self.records.is_empty()).then(|| {
            self.records.iter().map(|r| r.score).sum::<f64>() / self.records.len() as f64
        })
    }

    pub fn to_csv(&self) -> String {
        let mut out = format_record(&HEADER);
        for record in &self.records {
            out.push_str(&format_record(&[
                escape_field(&record.file),
                format_score(record.score),
            ]));
        }
        out
    }

    pub fn from_csv(text: &str) -> Result<Self> {
        let mut records = Vec::new();
        for (i, fields) in parse_records(text)?.into_iter().enumerate() {
            if i == 0 && fields.iter().map(String::as_str).eq(HEADER) {
                continue;
            }
            let [file, score] = fields.as_slice() else {
                return Err(Error::malformed_csv(i + 1, "expected file and score"));
            };
            let score = score
                .trim()
                .parse()
                .map_err(|_| Error::malformed_csv(i + 1, format!("invalid score {score:?}")))?;
            records.push(ScoreRecord::new(file.clone(), score));
        }
        Ok(Self::from_records(records))
    }

    pub fn read(path: &Path) -> Result<Self> {
        Self::from_csv(&crate::io::read_artifact(path)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        crate::io::write_artifact(path, &self.to_csv())
    }
}

/// Render a score with at least one decimal place (`1.0`, not `1`).
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}
