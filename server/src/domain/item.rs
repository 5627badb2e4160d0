//! Item Entity
//!
//! A recyclable-waste category a collection point can accept.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A recyclable item category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: u32,
    /// Display title (e.g. "Lâmpadas")
    pub title: String,
    /// Image file name inside the uploads directory
    pub image: String,
}

impl Item {
    /// Public representation with an absolute image URL
    pub fn to_view(&self, public_url: &str) -> ItemView {
        ItemView {
            id: self.id,
            title: self.title.clone(),
            image_url: upload_url(public_url, &self.image),
        }
    }
}

impl Entity for Item {
    type Id = u32;
}

/// Item as served by `GET /items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub title: String,
    pub image_url: String,
}

/// URL under which an uploaded file is served
pub(crate) fn upload_url(public_url: &str, file_name: &str) -> String {
    format!("{}/uploads/{}", public_url.trim_end_matches('/'), file_name)
}
