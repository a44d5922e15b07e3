//! The per-line results table (`flexeme.csv`).

use crate::core::{Error, Result};
use crate::io::csv::{format_record, parse_records, quote_field};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

pub const HEADER: [&str; 5] = ["file", "source", "target", "tool_group", "truth_group"];

/// One changed source line with both group assignments.
///
/// Exactly one of `source` (removed line) and `target` (added line) is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlattenedRow {
    pub file: String,
    pub source: Option<u32>,
    pub target: Option<u32>,
    pub tool_group: i64,
    pub truth_group: i64,
}

impl FlattenedRow {
    pub fn added(file: impl Into<String>, line: u32, tool_group: i64, truth_group: i64) -> Self {
        Self {
            file: file.into(),
            source: None,
            target: Some(line),
            tool_group,
            truth_group,
        }
    }

    pub fn removed(file: impl Into<String>, line: u32, tool_group: i64, truth_group: i64) -> Self {
        Self {
            file: file.into(),
            source: Some(line),
            target: None,
            tool_group,
            truth_group,
        }
    }

    fn to_record(&self) -> String {
        let line = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        format_record(&[
            quote_field(&self.file),
            line(self.source),
            line(self.target),
            self.tool_group.to_string(),
            self.truth_group.to_string(),
        ])
    }
}

/// De-duplicated rows in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexemeTable {
    rows: Vec<FlattenedRow>,
}

impl FlexemeTable {
    /// Build a table, dropping exact duplicate rows (first occurrence wins).
    pub fn from_rows(rows: impl IntoIterator<Item = FlattenedRow>) -> Self {
        let mut seen = HashSet::new();
        let rows = rows
            .into_iter()
            .filter(|row| seen.insert(row.clone()))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[FlattenedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn tool_groups(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.tool_group).collect()
    }

    pub fn truth_groups(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.truth_group).collect()
    }

    pub fn to_csv(&self) -> String {
        let mut out = format_record(&HEADER);
        for row in &self.rows {
            out.push_str(&row.to_record());
        }
        out
    }

    /// Parse CSV text. A leading header row is optional.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut records = parse_records(text)?.into_iter().enumerate().peekable();
        if let Some((_, first)) = records.peek() {
            if first.iter().map(|f| f.trim()).eq(HEADER.iter().copied()) {
                records.next();
            }
        }

        let rows = records
            .map(|(i, record)| parse_row(i + 1, &record))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_rows(rows))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = crate::io::read_artifact(path)?;
        Self::from_csv(&text)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        crate::io::write_artifact(path, &self.to_csv())
    }
}

fn parse_row(record: usize, fields: &[String]) -> Result<FlattenedRow> {
    let [file, source, target, tool, truth] = fields else {
        return Err(Error::malformed_csv(
            record,
            format!("expected {} fields, found {}", HEADER.len(), fields.len()),
        ));
    };

    let row = FlattenedRow {
        file: file.clone(),
        source: parse_line_number(record, "source", source)?,
        target: parse_line_number(record, "target", target)?,
        tool_group: parse_group(record, "tool_group", tool)?,
        truth_group: parse_group(record, "truth_group", truth)?,
    };

    if row.source.is_some() == row.target.is_some() {
        return Err(Error::malformed_csv(
            record,
            "exactly one of source and target must be set",
        ));
    }
    Ok(row)
}

fn is_missing(raw: &str) -> bool {
    matches!(raw, "" | "NA" | "<NA>" | "None" | "nan" | "NaN")
}

/// Integer or missing. Integral floats (`12.0`) written by older tooling are
/// accepted; any other fractional value is rejected.
fn parse_line_number(record: usize, column: &str, raw: &str) -> Result<Option<u32>> {
    let raw = raw.trim();
    if is_missing(raw) {
        return Ok(None);
    }
    let digits = raw.strip_suffix(".0").unwrap_or(raw);
    digits.parse::<u32>().map(Some).map_err(|_| {
        Error::malformed_csv(record, format!("{column} is not a line number: {raw:?}"))
    })
}

fn parse_group(record: usize, column: &str, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    let digits = raw.strip_suffix(".0").unwrap_or(raw);
    digits
        .parse::<i64>()
        .map_err(|_| Error::malformed_csv(record, format!("{column} is not a group id: {raw:?}")))
}
