use crate::flatten::FlexemeTable;
use crate::score::records::format_score;
use crate::score::{score_table, ScoreRecord, ScoresFile};
use anyhow::{Context, Result};
use std::path::Path;

/// Score one results CSV and print the Rand Index.
pub fn handle_score(csv_path: &Path, output: Option<&Path>, json: bool) -> Result<()> {
    let table = FlexemeTable::read(csv_path)
        .with_context(|| format!("Failed to read results {}", csv_path.display()))?;
    if table.is_empty() {
        log::warn!("{} has no rows", csv_path.display());
    }

    let record = ScoreRecord::new(csv_path.display().to_string(), score_table(&table));

    if let Some(path) = output {
        ScoresFile::from_records([record.clone()])
            .write(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", format_score(record.score));
    }
    Ok(())
}
