//! Point Entity
//!
//! A physical collection location registered by an entity, linked to the
//! item categories it accepts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};
use super::item::upload_url;

/// A registered collection point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier
    pub id: u32,
    /// Stored image file name, if one was uploaded
    pub image: Option<String>,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    /// District name
    pub city: String,
    /// State code (UF)
    pub uf: String,
    /// Creation time in unix milliseconds
    pub created_at: i64,
}

impl Point {
    /// Public representation with image URL and linked item ids
    pub fn to_view(&self, public_url: &str, items: Vec<u32>) -> PointView {
        PointView {
            id: self.id,
            image: self.image.clone(),
            image_url: self.image.as_deref().map(|image| upload_url(public_url, image)),
            name: self.name.clone(),
            email: self.email.clone(),
            whatsapp: self.whatsapp.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city.clone(),
            uf: self.uf.clone(),
            items,
        }
    }
}

impl Entity for Point {
    type Id = u32;
}

/// Point as served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointView {
    pub id: u32,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub items: Vec<u32>,
}

/// Validated input for creating a point
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoint {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub uf: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<u32>,
    pub image: Option<String>,
}

impl NewPoint {
    /// Build from submitted form fields
    ///
    /// Missing text fields become empty strings. Coordinates and item ids
    /// must parse.
    pub fn from_fields(fields: &HashMap<String, String>) -> DomainResult<Self> {
        let text = |key: &str| fields.get(key).cloned().unwrap_or_default();

        let latitude = parse_coordinate(&text("latitude"), "latitude", 90.0)?;
        let longitude = parse_coordinate(&text("longitude"), "longitude", 180.0)?;
        let items = parse_item_ids(&text("items"))?;

        Ok(Self {
            name: text("name"),
            email: text("email"),
            whatsapp: text("whatsapp"),
            uf: text("uf"),
            city: text("city"),
            latitude,
            longitude,
            items,
            image: None,
        })
    }
}

fn parse_coordinate(raw: &str, field: &str, limit: f64) -> DomainResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::InvalidInput(format!("{} must be a number, got '{}'", field, raw)))?;

    if !value.is_finite() || value.abs() > limit {
        return Err(DomainError::InvalidInput(format!("{} out of range: {}", field, value)));
    }
    Ok(value)
}

/// Parse a comma-joined id list such as `"1,2,3"`
///
/// Blank segments are skipped and duplicates collapse to their first
/// occurrence.
pub fn parse_item_ids(raw: &str) -> DomainResult<Vec<u32>> {
    let mut ids = Vec::new();
    for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id = segment
            .parse::<u32>()
            .map_err(|_| DomainError::InvalidInput(format!("invalid item id '{}'", segment)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Query filter for `GET /points`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointFilter {
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Comma-joined item ids; a point matches if it accepts any of them
    pub items: Option<String>,
}

impl PointFilter {
    pub fn item_ids(&self) -> DomainResult<Vec<u32>> {
        self.items.as_deref().map(parse_item_ids).unwrap_or_else(|| Ok(Vec::new()))
    }
}
