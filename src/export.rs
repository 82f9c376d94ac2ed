//! Store export
//!
//! Serializes the whole store as pretty JSON or as a flat CSV, and writes the
//! dated export artifacts.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::models::{Entry, Store};
use crate::storage::StoreResult;

/// Prefix shared by both export file names
pub const EXPORT_FILE_PREFIX: &str = "nutrition-tracker";

/// Header row of the tabular export
pub const CSV_HEADER: &str = "Date,Type,Description,Calories,Summary";

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// File name for an export made on `date`: "nutrition-tracker-2024-01-15.csv"
    pub fn file_name(&self, date: &str) -> String {
        format!("{}-{}.{}", EXPORT_FILE_PREFIX, date, self.as_str())
    }
}

/// A written export file
#[derive(Debug, Clone, Serialize)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub bytes: usize,
}

/// Whole store as pretty-printed JSON
pub fn to_structured(store: &Store) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(store)?)
}

/// Parse a structured export back into a store
pub fn from_structured(bytes: &[u8]) -> StoreResult<Store> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Whole store as CSV: one row per food, per activity (negated calories),
/// and per non-blank summary
pub fn to_tabular(store: &Store) -> Vec<u8> {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for record in store.values() {
        push_entries(&mut csv, &record.date, "Food", "", &record.foods);
        push_entries(&mut csv, &record.date, "Activity", "-", &record.activities);

        if !record.summary.trim().is_empty() {
            push_row(&mut csv, [
                record.date.as_str(),
                "Summary",
                record.summary.as_str(),
                "",
                record.summary.as_str(),
            ]);
        }
    }

    csv.into_bytes()
}

/// Render the store in the requested format
pub fn render(store: &Store, format: ExportFormat) -> StoreResult<Vec<u8>> {
    match format {
        ExportFormat::Json => to_structured(store),
        ExportFormat::Csv => Ok(to_tabular(store)),
    }
}

/// Write one export file named for `date` into `dir`
pub async fn write_export(
    store: &Store,
    format: ExportFormat,
    dir: &Path,
    date: &str,
) -> StoreResult<ExportArtifact> {
    let body = render(store, format)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format.file_name(date));
    tokio::fs::write(&path, &body).await?;

    info!(path = %path.display(), format = format.as_str(), bytes = body.len(), "Export written");

    Ok(ExportArtifact {
        format,
        path,
        mime_type: format.mime_type(),
        bytes: body.len(),
    })
}

/// One row per entry; `sign` prefixes the calories column
fn push_entries<E: Entry>(csv: &mut String, date: &str, kind: &str, sign: &str, entries: &[E]) {
    for entry in entries {
        let calories = format!("{}{}", sign, entry.amount());
        push_row(csv, [date, kind, entry.description(), calories.as_str(), ""]);
    }
}

fn push_row(csv: &mut String, fields: [&str; 5]) {
    let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
    csv.push_str(&row.join(","));
    csv.push('\n');
}

/// Wrap in quotes, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
