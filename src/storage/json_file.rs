//! JSON blob backend
//!
//! The whole store lives in one pretty-printed JSON file, in the same format as
//! the structured export, so an export can be used as a data file.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::export;
use crate::models::Store;
use super::{BackendInfo, BackendKind, StorageBackend, StoreResult};

/// Store kept as a single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn load(&self) -> StoreResult<Store> {
        if !fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "No data file yet, starting empty");
            return Ok(Store::new());
        }

        let raw = fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Ok(Store::new());
        }

        export::from_structured(raw.as_bytes())
    }

    async fn save(&self, store: &Store) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let body = export::to_structured(store)?;

        // Write beside the target then rename over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), dates = store.len(), "Saved store");
        Ok(())
    }

    fn describe(&self) -> BackendInfo {
        BackendInfo {
            kind: BackendKind::Json,
            path: self.path.clone(),
        }
    }
}
