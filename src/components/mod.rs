//! UI Components
//!
//! Leptos components for the home and registration screens.

mod create_point;
mod home;
mod item_grid;
mod location_select;
mod map_picker;
mod page_header;

pub use create_point::CreatePoint;
pub use home::Home;
pub use item_grid::ItemGrid;
pub use location_select::LocationSelect;
pub use map_picker::MapPicker;
pub use page_header::PageHeader;
