//! Repository Layer
//!
//! Data access abstractions and SQLite implementations.

mod traits;
mod db;
mod item_repo;
mod point_repo;


pub use traits::Repository;
pub use db::{init_db, DbState};
pub use item_repo::ItemRepository;
pub use point_repo::PointRepository;
