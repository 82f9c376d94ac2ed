//! SQLite document backend
//!
//! The store is one JSON document in the `documents` table under [`STORE_KEY`].
//! rusqlite is blocking, so every call runs on the blocking thread pool.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tokio::task;
use tracing::{debug, info};

use crate::db::{migrations, Database};
use crate::models::{Store, StoredDocument};
use super::{BackendInfo, BackendKind, StorageBackend, StoreError, StoreResult, STORE_KEY};

/// Store kept as a single SQLite document
///
/// The database is opened on first use, so an unreadable file surfaces as a
/// failed load or save instead of a failed startup. A failed open is retried
/// by the next call.
#[derive(Clone)]
pub struct SqliteBackend {
    database: Arc<OnceCell<Database>>,
    path: PathBuf,
}

impl SqliteBackend {
    pub fn new(path: PathBuf) -> Self {
        Self {
            database: Arc::new(OnceCell::new()),
            path,
        }
    }

    /// Open (creating if needed) the database and bring its schema up to date
    async fn database(&self) -> StoreResult<Database> {
        let database = self
            .database
            .get_or_try_init(|| async {
                if let Some(parent) = self.path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let db_path = self.path.clone();
                let database = task::spawn_blocking(move || -> StoreResult<Database> {
                    let database = Database::new(&db_path)?;
                    database.with_conn(|conn| {
                        if migrations::needs_migration(conn)? {
                            migrations::run_migrations(conn)?;
                        }
                        let version = migrations::get_schema_version(conn)?;
                        info!(version, "Database schema ready");
                        Ok(())
                    })?;
                    Ok(database)
                })
                .await??;
                Ok::<_, StoreError>(database)
            })
            .await?;

        Ok(database.clone())
    }
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    async fn load(&self) -> StoreResult<Store> {
        let database = self.database().await?;
        let doc = task::spawn_blocking(move || {
            database.with_conn(|conn| StoredDocument::get(conn, STORE_KEY))
        })
        .await??;

        match doc {
            Some(doc) => Ok(serde_json::from_str(&doc.body)?),
            None => {
                debug!("No stored document yet, starting empty");
                Ok(Store::new())
            }
        }
    }

    async fn save(&self, store: &Store) -> StoreResult<()> {
        let body = serde_json::to_string(store)?;
        let database = self.database().await?;

        let doc = task::spawn_blocking(move || {
            database.with_conn(|conn| StoredDocument::upsert(conn, STORE_KEY, &body))
        })
        .await??;

        debug!(updated_at = %doc.updated_at, dates = store.len(), "Saved store document");
        Ok(())
    }

    fn describe(&self) -> BackendInfo {
        BackendInfo {
            kind: BackendKind::Sqlite,
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, FoodEntry};

    fn sample_store() -> Store {
        let mut record = DailyRecord::empty("2024-01-15");
        record.foods.push(FoodEntry {
            id: "f1".to_string(),
            description: "Toast".to_string(),
            calories: 120,
            timestamp: "2024-01-15T08:00:00.000Z".to_string(),
        });
        let mut store = Store::new();
        store.insert(record.date.clone(), record);
        store
    }

    #[tokio::test]
    async fn test_empty_database_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::new(dir.path().join("data.db"));
        assert!(backend.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::new(dir.path().join("data.db"));

        let mut store = sample_store();
        backend.save(&store).await.unwrap();
        assert_eq!(backend.load().await.unwrap(), store);

        store.insert("2024-01-16".to_string(), DailyRecord::empty("2024-01-16"));
        backend.save(&store).await.unwrap();
        assert_eq!(backend.load().await.unwrap().len(), 2);

        let rows: i64 = backend
            .database()
            .await
            .unwrap()
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.db");

        let store = sample_store();
        SqliteBackend::new(path.clone()).save(&store).await.unwrap();

        let reopened = SqliteBackend::new(path);
        assert_eq!(reopened.load().await.unwrap(), store);
    }

    #[tokio::test]
    async fn test_new_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.db");

        let backend = SqliteBackend::new(path.clone());
        assert!(!path.exists());

        assert!(backend.load().await.unwrap().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_non_database_file_fails_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let backend = SqliteBackend::new(path);
        assert!(backend.load().await.is_err());
        assert!(backend.save(&sample_store()).await.is_err());
    }
}
