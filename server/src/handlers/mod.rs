//! Handlers Layer
//!
//! HTTP handlers that bridge clients to the repositories.

mod error;
mod health;
mod item_handler;
mod point_handler;
mod uploads;

pub use error::{ApiError, ApiResult};
pub use health::{health, HealthResponse};
pub use item_handler::list_items;
pub use point_handler::{create_point, get_point, list_points, PointDetail};
pub use uploads::{install_catalog_images, serve_upload, store_upload, StoredUpload};
