//! Item Repository
//!
//! SQLite-backed access to the recyclable item catalog.

use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Item};
use super::traits::Repository;

/// SQLite implementation of Item repository
pub struct ItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ItemRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Items linked to a point, ordered by ID
    pub async fn find_by_point(&self, point_id: u32) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(
                "SELECT i.id, i.title, i.image FROM items i
                 JOIN point_items pi ON pi.item_id = i.id
                 WHERE pi.point_id = ?
                 ORDER BY i.id",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params![point_id], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, title, image FROM items WHERE id = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query_map(params![id], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.next()
            .transpose()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, title, image FROM items ORDER BY id")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

/// Convert a database row to Item
fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        image: row.get(2)?,
    })
}
