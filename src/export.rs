//! CSV export of the currently displayed table: explicit header row from
//! the row type's column schema, one record per row, UTF-8.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Serialize `rows` under the given header row. The header is written even
/// for an empty table so the column schema survives export.
pub fn to_csv_string<S: Serialize>(columns: &[&str], rows: &[S]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(columns)
        .context("failed to write CSV header")?;
    for row in rows {
        writer.serialize(row).context("failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV buffer: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Write a table to a CSV file (CLI export path).
pub fn save_csv<S: Serialize>(columns: &[&str], rows: &[S], path: &Path) -> Result<()> {
    let csv = to_csv_string(columns, rows)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}
