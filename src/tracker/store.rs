//! Daily record store
//!
//! Date-keyed records cached in memory over a [`StorageBackend`]. Every write
//! lands in the cache first and is then persisted; a failed save leaves the
//! cache holding the new value (saved locally, not durable).

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::models::{DailyRecord, Store};
use crate::storage::{BackendInfo, StorageBackend, StoreResult};

/// Shared handle to the date-indexed store; clones share state
#[derive(Clone)]
pub struct DailyRecordStore {
    records: Arc<RwLock<Store>>,
    backend: Arc<dyn StorageBackend>,
    /// Serializes saves so each one writes the newest snapshot
    save_lock: Arc<Mutex<()>>,
}

impl DailyRecordStore {
    /// Load the store from the backend; on failure start empty and log it
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Self {
        let records = match backend.load().await {
            Ok(store) => {
                debug!(dates = store.len(), "Loaded store");
                store
            }
            Err(e) => {
                error!(error = %e, "Failed to load store, starting empty");
                Store::new()
            }
        };

        Self {
            records: Arc::new(RwLock::new(records)),
            backend,
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Record for `date`, or an unsaved empty record when nothing exists yet
    pub async fn get(&self, date: &str) -> DailyRecord {
        let records = self.records.read().await;
        records
            .get(date)
            .cloned()
            .unwrap_or_else(|| DailyRecord::empty(date))
    }

    /// Upsert the full record for `date`, then persist.
    ///
    /// The cache is updated before the save starts; an `Err` means the value is
    /// held locally but not durable.
    pub async fn put(&self, date: &str, record: DailyRecord) -> StoreResult<()> {
        self.replace(date, record).await;
        self.save().await
    }

    /// Get-or-create the record for `date`, mutate it in the cache, and return
    /// the new record with the closure's result. Does not persist.
    pub async fn modify<F, R>(&self, date: &str, f: F) -> (DailyRecord, R)
    where
        F: FnOnce(&mut DailyRecord) -> R,
    {
        let mut records = self.records.write().await;
        let record = records
            .entry(date.to_string())
            .or_insert_with(|| DailyRecord::empty(date));
        let result = f(record);
        (record.clone(), result)
    }

    /// Snapshot of every known record
    pub async fn all(&self) -> Store {
        self.records.read().await.clone()
    }

    /// Persist the current cache contents
    pub async fn save(&self) -> StoreResult<()> {
        let _guard = self.save_lock.lock().await;
        let snapshot = self.all().await;
        let result = self.backend.save(&snapshot).await;
        if let Err(ref e) = result {
            error!(error = %e, "Failed to save store; changes are kept in memory only");
        }
        result
    }

    /// Fire-and-forget save; the outcome is only logged
    pub fn schedule_save(&self) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            if store.save().await.is_ok() {
                debug!("Background save complete");
            }
        })
    }

    pub fn backend_info(&self) -> BackendInfo {
        self.backend.describe()
    }

    async fn replace(&self, date: &str, mut record: DailyRecord) {
        // The key is authoritative for the record's date
        record.date = date.to_string();
        self.records.write().await.insert(date.to_string(), record);
        debug!(date, "Record updated");
    }
}
