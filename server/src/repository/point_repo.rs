//! Point Repository
//!
//! SQLite-backed storage for collection points and their item links.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, NewPoint, Point, PointFilter};
use super::traits::Repository;

const POINT_COLUMNS: &str =
    "p.id, p.image, p.name, p.email, p.whatsapp, p.latitude, p.longitude, p.city, p.uf, p.created_at";

/// SQLite implementation of Point repository
pub struct PointRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PointRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Insert a point and its item links in one transaction
    ///
    /// Fails with `InvalidInput` when any item id is not in the catalog; in
    /// that case nothing is written.
    pub async fn create(&self, new_point: &NewPoint) -> DomainResult<Point> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        for item_id in &new_point.items {
            let exists: bool = tx
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM items WHERE id = ?)",
                    params![item_id],
                    |row| row.get(0),
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            if !exists {
                return Err(DomainError::InvalidInput(format!("unknown item id {}", item_id)));
            }
        }

        let created_at = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "INSERT INTO points (image, name, email, whatsapp, latitude, longitude, city, uf, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                new_point.image,
                new_point.name,
                new_point.email,
                new_point.whatsapp,
                new_point.latitude,
                new_point.longitude,
                new_point.city,
                new_point.uf,
                created_at
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rowid = tx.last_insert_rowid();
        let id = u32::try_from(rowid)
            .map_err(|_| DomainError::Internal(format!("point id {} out of range", rowid)))?;

        for item_id in &new_point.items {
            tx.execute(
                "INSERT INTO point_items (point_id, item_id) VALUES (?, ?)",
                params![id, item_id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Point {
            id,
            image: new_point.image.clone(),
            name: new_point.name.clone(),
            email: new_point.email.clone(),
            whatsapp: new_point.whatsapp.clone(),
            latitude: new_point.latitude,
            longitude: new_point.longitude,
            city: new_point.city.clone(),
            uf: new_point.uf.clone(),
            created_at,
        })
    }

    /// IDs of the items a point accepts
    pub async fn item_ids(&self, point_id: u32) -> DomainResult<Vec<u32>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT item_id FROM point_items WHERE point_id = ? ORDER BY item_id")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params![point_id], |row| row.get::<_, u32>(0))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Points matching every provided filter
    ///
    /// Blank `city`/`uf` values are ignored. With item ids, a point matches
    /// when it accepts at least one of them.
    pub async fn filter(&self, filter: &PointFilter) -> DomainResult<Vec<Point>> {
        let item_ids = filter.item_ids()?;

        let mut sql = format!("SELECT DISTINCT {} FROM points p", POINT_COLUMNS);
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if !item_ids.is_empty() {
            sql.push_str(" JOIN point_items pi ON pi.point_id = p.id");
            let placeholders = vec!["?"; item_ids.len()].join(", ");
            clauses.push(format!("pi.item_id IN ({})", placeholders));
            values.extend(item_ids.iter().map(|id| Value::Integer(i64::from(*id))));
        }
        if let Some(city) = filter.city.as_deref().filter(|c| !c.is_empty()) {
            clauses.push("p.city = ?".to_string());
            values.push(Value::Text(city.to_string()));
        }
        if let Some(uf) = filter.uf.as_deref().filter(|u| !u.is_empty()) {
            clauses.push("p.uf = ?".to_string());
            values.push(Value::Text(uf.to_string()));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY p.id");

        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(values.iter()), row_to_point)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[async_trait]
impl Repository<Point> for PointRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Point>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM points p WHERE p.id = ?", POINT_COLUMNS))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query_map(params![id], row_to_point)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.next()
            .transpose()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<Point>> {
        self.filter(&PointFilter::default()).await
    }
}

/// Convert a database row to Point
fn row_to_point(row: &rusqlite::Row) -> rusqlite::Result<Point> {
    Ok(Point {
        id: row.get(0)?,
        image: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        whatsapp: row.get(4)?,
        latitude: row.get(5)?,
        longitude: row.get(6)?,
        city: row.get(7)?,
        uf: row.get(8)?,
        created_at: row.get(9)?,
    })
}
