//! Daily data tools
//!
//! Read and write whole daily records, change the summary, and move between dates.

use serde::Serialize;

use crate::dates;
use crate::models::{CalorieTotals, DailyRecord};
use crate::tracker::{aggregate, DailyRecordStore};

/// A daily record with its derived totals
#[derive(Debug, Serialize)]
pub struct DailyDataResponse {
    pub date: String,
    pub display_date: String,
    pub record: DailyRecord,
    pub totals: CalorieTotals,
    pub net_display: String,
    /// Whether a calorie summary is worth showing (anything consumed or burned)
    pub has_totals: bool,
}

impl DailyDataResponse {
    pub(crate) fn from_record(record: DailyRecord) -> Result<Self, String> {
        let display_date = dates::format_display(&record.date)?;
        let totals = aggregate::totals(&record);
        Ok(Self {
            date: record.date.clone(),
            display_date,
            net_display: totals.net_display(),
            has_totals: totals.has_activity(),
            record,
            totals,
        })
    }
}

/// Response for save_daily_data
#[derive(Debug, Serialize)]
pub struct SaveDailyDataResponse {
    pub date: String,
    /// false: held in memory only, not yet durable
    pub persisted: bool,
    pub message: String,
}

/// Response for navigate_date
#[derive(Debug, Serialize)]
pub struct NavigateDateResponse {
    pub date: String,
    pub display_date: String,
}

// ============================================================================
// Day Tools
// ============================================================================

/// Get the record for a date (empty when nothing is logged yet)
pub async fn get_daily_data(store: &DailyRecordStore, date: &str) -> Result<DailyDataResponse, String> {
    let date = normalize(date)?;
    DailyDataResponse::from_record(store.get(&date).await)
}

/// Replace the whole record for a date and persist it
pub async fn save_daily_data(
    store: &DailyRecordStore,
    date: &str,
    record: DailyRecord,
) -> Result<SaveDailyDataResponse, String> {
    let date = normalize(date)?;

    match store.put(&date, record).await {
        Ok(()) => Ok(SaveDailyDataResponse {
            date,
            persisted: true,
            message: "Saved".to_string(),
        }),
        Err(e) => Ok(SaveDailyDataResponse {
            date,
            persisted: false,
            message: format!("Saved locally but not durable: {}", e),
        }),
    }
}

/// Replace the free-text summary for a date
pub async fn summary_change(
    store: &DailyRecordStore,
    date: &str,
    summary: &str,
) -> Result<DailyDataResponse, String> {
    let date = normalize(date)?;

    let current = store.get(&date).await;
    if current.summary == summary {
        return DailyDataResponse::from_record(current);
    }

    let (record, ()) = store
        .modify(&date, |record| record.summary = summary.to_string())
        .await;
    store.schedule_save();

    DailyDataResponse::from_record(record)
}

/// Date `offset` days from `date`, with its display form
pub fn navigate_date(date: &str, offset: i64) -> Result<NavigateDateResponse, String> {
    let date = dates::offset(date, offset)?;
    Ok(NavigateDateResponse {
        display_date: dates::format_display(&date)?,
        date,
    })
}

/// Canonical `YYYY-MM-DD` form of a user-supplied date
pub(crate) fn normalize(date: &str) -> Result<String, String> {
    dates::offset(date, 0)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::JsonFileBackend;

    async fn open_store(dir: &tempfile::TempDir) -> DailyRecordStore {
        let backend = JsonFileBackend::new(dir.path().join("data.json"));
        DailyRecordStore::open(Arc::new(backend)).await
    }

    #[tokio::test]
    async fn test_get_empty_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let day = get_daily_data(&store, "2024-01-15").await.unwrap();
        assert_eq!(day.display_date, "Monday, January 15, 2024");
        assert_eq!(day.record, DailyRecord::empty("2024-01-15"));
        assert_eq!(day.net_display, "+0");
        assert!(!day.has_totals);
    }

    #[tokio::test]
    async fn test_invalid_date_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        assert!(get_daily_data(&store, "tomorrow").await.is_err());
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let mut record = DailyRecord::empty("2024-01-15");
        record.foods = aggregate::add_entry(&record.foods, "Toast", 120);
        record.activities = aggregate::add_entry(&record.activities, "Walk", 200);

        let saved = save_daily_data(&store, "2024-01-15", record.clone()).await.unwrap();
        assert!(saved.persisted);

        let day = get_daily_data(&store, "2024-01-15").await.unwrap();
        assert_eq!(day.record, record);
        assert_eq!(day.totals, CalorieTotals::new(120, 200));
        assert_eq!(day.net_display, "-80");
        assert!(day.has_totals);
    }

    #[tokio::test]
    async fn test_summary_change() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let day = summary_change(&store, "2024-01-15", "Felt good").await.unwrap();
        assert_eq!(day.record.summary, "Felt good");
        assert_eq!(store.get("2024-01-15").await.summary, "Felt good");
    }

    #[tokio::test]
    async fn test_unchanged_summary_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let day = summary_change(&store, "2024-01-15", "").await.unwrap();
        assert_eq!(day.record, DailyRecord::empty("2024-01-15"));
        assert!(store.all().await.is_empty());
    }

    #[test]
    fn test_navigate_date() {
        let prev = navigate_date("2024-03-01", -1).unwrap();
        assert_eq!(prev.date, "2024-02-29");
        assert_eq!(prev.display_date, "Thursday, February 29, 2024");
        assert_eq!(navigate_date("2024-01-01", -1).unwrap().date, "2023-12-31");
    }
}
