//! Per-category CSV export

use crate::output::traits::{CategoryExport, ItemRecord, OutputError, OutputHandler, OutputResult};
use std::path::{Path, PathBuf};

/// Writes each category to `<output_dir>/<slug>.csv`
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the export file for a category slug
    pub fn export_path(&self, slug: &str) -> PathBuf {
        self.output_dir.join(format!("{}.csv", slug))
    }
}

impl OutputHandler for CsvExporter {
    /// Creates or truncates the category file, then writes the header and
    /// one row per record. An empty category still gets its header row.
    fn write_category(&self, export: &CategoryExport) -> OutputResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.export_path(&export.slug);

        // Header written by hand so empty exports keep it
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(ItemRecord::HEADERS)?;
        for record in &export.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(path)
    }
}

/// Reads a category export back into records
///
/// # Errors
///
/// Fails if the file cannot be read, a row is malformed, or the header does
/// not match the export column order.
pub fn read_category_csv(path: &Path) -> OutputResult<Vec<ItemRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(ItemRecord::HEADERS) {
        return Err(OutputError::Format(format!(
            "unexpected header in {}: {:?}",
            path.display(),
            headers
        )));
    }

    reader
        .deserialize::<ItemRecord>()
        .map(|row| row.map_err(OutputError::from))
        .collect()
}
