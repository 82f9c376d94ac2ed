//! Export tools
//!
//! Write the whole store to dated JSON / CSV files. Failures are logged in full
//! and reported to the user as one plain notice.

use std::path::Path;

use serde::Serialize;
use tracing::error;

use crate::dates;
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::models::CalorieTotals;
use crate::tracker::{aggregate, DailyRecordStore};

/// User-facing message for any export failure
pub const EXPORT_FAILED_NOTICE: &str = "Export failed. Please try again.";

/// Response for export_data
#[derive(Debug, Serialize)]
pub struct ExportDataResponse {
    pub success: bool,
    pub files: Vec<ExportArtifact>,
    pub dates_exported: usize,
    /// Totals over every exported day
    pub totals: CalorieTotals,
    pub message: String,
}

/// Export in one format, or both when `format` is None
pub async fn export_data(
    store: &DailyRecordStore,
    format: Option<ExportFormat>,
    export_dir: &Path,
) -> Result<ExportDataResponse, String> {
    let formats = match format {
        Some(format) => vec![format],
        None => vec![ExportFormat::Json, ExportFormat::Csv],
    };

    let snapshot = store.all().await;
    let today = dates::today();

    let mut files = Vec::new();
    for format in formats {
        match export::write_export(&snapshot, format, export_dir, &today).await {
            Ok(artifact) => files.push(artifact),
            Err(e) => {
                error!(error = %e, format = format.as_str(), "Export failed");
                return Err(EXPORT_FAILED_NOTICE.to_string());
            }
        }
    }

    Ok(ExportDataResponse {
        success: true,
        message: format!("Exported {} day(s) to {} file(s)", snapshot.len(), files.len()),
        dates_exported: snapshot.len(),
        totals: aggregate::totals_across(snapshot.values()),
        files,
    })
}
