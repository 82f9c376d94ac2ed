//! Runtime configuration
//!
//! Resolved from environment variables:
//!
//! - `NUTRITION_TRACKER_BACKEND`: `sqlite` (default) or `json`
//! - `NUTRITION_TRACKER_DATA_PATH`: data file, defaults to `<project>/data/nutrition-tracker.<db|json>`
//! - `NUTRITION_TRACKER_EXPORT_DIR`: export directory, defaults to `<project>/exports`

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::storage::BackendKind;

pub const BACKEND_VAR: &str = "NUTRITION_TRACKER_BACKEND";
pub const DATA_PATH_VAR: &str = "NUTRITION_TRACKER_DATA_PATH";
pub const EXPORT_DIR_VAR: &str = "NUTRITION_TRACKER_EXPORT_DIR";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: BackendKind,
    pub data_path: PathBuf,
    pub export_dir: PathBuf,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok(), &project_root())
    }

    /// Resolve against an arbitrary variable lookup and project root
    pub fn resolve<F>(lookup: F, root: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup(BACKEND_VAR) {
            Some(value) => BackendKind::from_str(&value).unwrap_or_else(|| {
                warn!(value = %value, "Unknown storage backend, using sqlite");
                BackendKind::Sqlite
            }),
            None => BackendKind::Sqlite,
        };

        let data_path = lookup(DATA_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                root.join("data")
                    .join(format!("nutrition-tracker.{}", backend.extension()))
            });

        let export_dir = lookup(EXPORT_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("exports"));

        Self {
            backend,
            data_path,
            export_dir,
        }
    }
}

/// Directory of the executable, walked up out of target/release or target/debug
pub fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path
}
