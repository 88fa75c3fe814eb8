//! CSV export of the current view.

use crate::table::Column;
use anyhow::{Context, Result};
use chrono::Local;
use shared::EnrichedRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write records as CSV, header row first, columns in table order
pub fn write_csv<W: Write>(records: &[EnrichedRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(Column::ALL.iter().map(|c| c.header()))
        .context("Failed to write CSV header")?;
    for record in records {
        csv.write_record(Column::ALL.iter().map(|c| c.cell(record)))
            .with_context(|| format!("Failed to write CSV row {}", record.id))?;
    }

    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Timestamped export file name inside `dir`
pub fn default_export_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref()
        .join(Local::now().format("books-%Y%m%d-%H%M%S.csv").to_string())
}

/// Export records to a CSV file, creating parent directories as needed
pub fn export_to_file(records: &[EnrichedRecord], path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create export directory: {}", parent.display())
            })?;
        }
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(records, file)?;

    info!(path = %path.display(), records = records.len(), "Exported CSV");
    Ok(path.to_path_buf())
}
