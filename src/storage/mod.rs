//! Persistence backends
//!
//! The whole store is loaded and saved as one unit. Two interchangeable
//! backends implement [`StorageBackend`]: a JSON blob file and a single
//! document in SQLite.

mod json_file;
mod sqlite;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;
use crate::models::Store;

pub use json_file::JsonFileBackend;
pub use sqlite::SqliteBackend;

/// Constant key the whole store is persisted under
pub const STORE_KEY: &str = "nutrition-tracker-data";

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Background storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Which backend holds the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Sqlite,
    Json,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "db" => Some(BackendKind::Sqlite),
            "json" | "file" => Some(BackendKind::Json),
            _ => None,
        }
    }

    /// File extension for the default data file
    pub fn extension(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "db",
            BackendKind::Json => "json",
        }
    }
}

/// Backend description for status reporting
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    pub kind: BackendKind,
    pub path: PathBuf,
}

/// Load/save contract for the whole store
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the full store; a backend with no data yet yields an empty store
    async fn load(&self) -> StoreResult<Store>;

    /// Durably replace the full store
    async fn save(&self, store: &Store) -> StoreResult<()>;

    fn describe(&self) -> BackendInfo;
}

/// Backend for the configured kind. Nothing is read until the first load or
/// save, so a missing or unreadable data file never prevents startup.
pub fn open_backend(kind: BackendKind, path: PathBuf) -> Arc<dyn StorageBackend> {
    match kind {
        BackendKind::Sqlite => Arc::new(SqliteBackend::new(path)),
        BackendKind::Json => Arc::new(JsonFileBackend::new(path)),
    }
}
