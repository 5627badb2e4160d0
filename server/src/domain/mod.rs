//! Domain Layer
//!
//! Contains the collection point entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod item;
mod point;

pub use entity::{Entity, DomainError, DomainResult};
pub use item::{Item, ItemView};
pub use point::{parse_item_ids, NewPoint, Point, PointFilter, PointView};
