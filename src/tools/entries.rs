//! Entry tools
//!
//! Add, edit and delete food and activity entries from raw user input. Rejected
//! input is a silent no-op reported as `changed: false`; every applied change
//! schedules a background save.

use serde::Serialize;
use tracing::debug;

use crate::models::{ActivityEntry, DailyRecord, Entry, FoodEntry};
use crate::tracker::{aggregate, input, DailyRecordStore};
use super::days::{normalize, DailyDataResponse};

/// Response for entry add/edit/delete
#[derive(Debug, Serialize)]
pub struct EntryChangeResponse {
    pub changed: bool,
    /// Id of the created entry (add only)
    pub entry_id: Option<String>,
    pub day: DailyDataResponse,
}

fn foods(record: &mut DailyRecord) -> &mut Vec<FoodEntry> {
    &mut record.foods
}

fn activities(record: &mut DailyRecord) -> &mut Vec<ActivityEntry> {
    &mut record.activities
}

// ============================================================================
// Food Tools
// ============================================================================

pub async fn add_food(
    store: &DailyRecordStore,
    date: &str,
    description: &str,
    calories: &str,
) -> Result<EntryChangeResponse, String> {
    add(store, date, foods, description, calories).await
}

pub async fn edit_food(
    store: &DailyRecordStore,
    date: &str,
    id: &str,
    description: &str,
    calories: &str,
) -> Result<EntryChangeResponse, String> {
    edit(store, date, foods, id, description, calories).await
}

pub async fn delete_food(store: &DailyRecordStore, date: &str, id: &str) -> Result<EntryChangeResponse, String> {
    delete(store, date, foods, id).await
}

// ============================================================================
// Activity Tools
// ============================================================================

pub async fn add_activity(
    store: &DailyRecordStore,
    date: &str,
    description: &str,
    calories_burned: &str,
) -> Result<EntryChangeResponse, String> {
    add(store, date, activities, description, calories_burned).await
}

pub async fn edit_activity(
    store: &DailyRecordStore,
    date: &str,
    id: &str,
    description: &str,
    calories_burned: &str,
) -> Result<EntryChangeResponse, String> {
    edit(store, date, activities, id, description, calories_burned).await
}

pub async fn delete_activity(store: &DailyRecordStore, date: &str, id: &str) -> Result<EntryChangeResponse, String> {
    delete(store, date, activities, id).await
}

// ============================================================================
// Shared list edits
// ============================================================================

async fn add<E: Entry>(
    store: &DailyRecordStore,
    date: &str,
    list: fn(&mut DailyRecord) -> &mut Vec<E>,
    description: &str,
    amount: &str,
) -> Result<EntryChangeResponse, String> {
    let date = normalize(date)?;

    let Some(entry_input) = input::parse_entry_input(description, amount) else {
        debug!(date = %date, "Add ignored: invalid input");
        return unchanged(store, &date).await;
    };

    let (record, entry_id) = store
        .modify(&date, |record| {
            let entries = list(record);
            *entries = aggregate::add_entry(entries, &entry_input.description, entry_input.amount);
            entries.last().map(|e| e.id().to_string())
        })
        .await;

    store.schedule_save();

    Ok(EntryChangeResponse {
        changed: true,
        entry_id,
        day: DailyDataResponse::from_record(record)?,
    })
}

async fn edit<E: Entry>(
    store: &DailyRecordStore,
    date: &str,
    list: fn(&mut DailyRecord) -> &mut Vec<E>,
    id: &str,
    description: &str,
    amount: &str,
) -> Result<EntryChangeResponse, String> {
    let date = normalize(date)?;

    let Some(entry_input) = input::parse_entry_input(description, amount) else {
        debug!(date = %date, id, "Edit ignored: invalid input");
        return unchanged(store, &date).await;
    };

    if !contains(store, &date, list, id).await {
        return unchanged(store, &date).await;
    }

    let (record, _) = store
        .modify(&date, |record| {
            let entries = list(record);
            *entries = aggregate::edit_entry(entries, id, &entry_input.description, entry_input.amount);
        })
        .await;

    store.schedule_save();

    Ok(EntryChangeResponse {
        changed: true,
        entry_id: None,
        day: DailyDataResponse::from_record(record)?,
    })
}

async fn delete<E: Entry>(
    store: &DailyRecordStore,
    date: &str,
    list: fn(&mut DailyRecord) -> &mut Vec<E>,
    id: &str,
) -> Result<EntryChangeResponse, String> {
    let date = normalize(date)?;

    if !contains(store, &date, list, id).await {
        return unchanged(store, &date).await;
    }

    let (record, _) = store
        .modify(&date, |record| {
            let entries = list(record);
            *entries = aggregate::delete_entry(entries, id);
        })
        .await;

    store.schedule_save();

    Ok(EntryChangeResponse {
        changed: true,
        entry_id: None,
        day: DailyDataResponse::from_record(record)?,
    })
}

async fn contains<E: Entry>(
    store: &DailyRecordStore,
    date: &str,
    list: fn(&mut DailyRecord) -> &mut Vec<E>,
    id: &str,
) -> bool {
    let mut record = store.get(date).await;
    list(&mut record).iter().any(|e| e.id() == id)
}

async fn unchanged(store: &DailyRecordStore, date: &str) -> Result<EntryChangeResponse, String> {
    Ok(EntryChangeResponse {
        changed: false,
        entry_id: None,
        day: DailyDataResponse::from_record(store.get(date).await)?,
    })
}
