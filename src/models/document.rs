//! Stored document model
//!
//! A named JSON document row in the `documents` table. The SQLite backend keeps
//! the whole store in one of these, keyed by a constant id.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A persisted JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl StoredDocument {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            body: row.get("body")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get a document by ID
    pub fn get(conn: &Connection, id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM documents WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(doc) => Ok(Some(doc)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace a document body in a single statement
    pub fn upsert(conn: &Connection, id: &str, body: &str) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO documents (id, body)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                updated_at = datetime('now')
            "#,
            params![id, body],
        )?;

        Self::get(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }
}
