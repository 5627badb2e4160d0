//! Create-Point State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. One store lives
//! for one visit to the registration page.

use leptos::prelude::*;
use leptos_dropzone::DroppedFile;
use reactive_stores::Store;

use crate::form::{FormField, LocalityQuery, PointForm};
use crate::geo::LatLng;
use crate::models::Item;

/// Registration page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CreatePointState {
    /// Collectible item catalog
    pub items: Vec<Item>,
    /// Region codes
    pub ufs: Vec<String>,
    /// Localities of the selected region
    pub cities: Vec<String>,
    /// Where the map opens (browser position once known)
    pub initial_position: LatLng,
    /// What the user entered so far
    pub form: PointForm,
}

/// Type alias for the store
pub type CreatePointStore = Store<CreatePointState>;

/// Get the registration store from context
pub fn use_create_point_store() -> CreatePointStore {
    expect_context::<CreatePointStore>()
}

// ========================
// Loaders
// ========================

pub fn store_set_items(store: &CreatePointStore, items: Vec<Item>) {
    store.items().set(items);
}

pub fn store_set_ufs(store: &CreatePointStore, ufs: Vec<String>) {
    store.ufs().set(ufs);
}

pub fn store_set_initial_position(store: &CreatePointStore, position: LatLng) {
    store.initial_position().set(position);
}

/// Apply a locality response; returns false when it was superseded
pub fn store_apply_cities(store: &CreatePointStore, query: &LocalityQuery, cities: Vec<String>) -> bool {
    let current = store
        .form()
        .try_with_untracked(|form| form.is_current(query))
        .unwrap_or(false);
    if !current {
        return false;
    }
    store.cities().set(cities);
    true
}

// ========================
// Form Updates
// ========================

pub fn store_set_field(store: &CreatePointStore, field: FormField, value: String) {
    store.form().write().set_field(field, value);
}

pub fn store_toggle_item(store: &CreatePointStore, item_id: u32) {
    store.form().write().toggle_item(item_id);
}

pub fn store_set_position(store: &CreatePointStore, position: LatLng) {
    store.form().write().set_position(position);
}

pub fn store_set_image(store: &CreatePointStore, image: Option<DroppedFile>) {
    store.form().write().set_image(image);
}

/// Select a region and drop the locality list of the previous one
pub fn store_select_uf(store: &CreatePointStore, uf: &str) -> Option<LocalityQuery> {
    if store.form().read_untracked().uf == uf {
        return None;
    }
    let query = store.form().write().select_uf(uf);
    store.cities().write().clear();
    query
}

pub fn store_select_city(store: &CreatePointStore, city: &str) {
    store.form().write().select_city(city);
}

// ========================
// Reads
// ========================

pub fn store_items(store: &CreatePointStore) -> Vec<Item> {
    store.items().get()
}

pub fn store_ufs(store: &CreatePointStore) -> Vec<String> {
    store.ufs().get()
}

pub fn store_cities(store: &CreatePointStore) -> Vec<String> {
    store.cities().get()
}

pub fn store_initial_position(store: &CreatePointStore) -> LatLng {
    store.initial_position().get()
}

pub fn store_field(store: &CreatePointStore, field: FormField) -> String {
    store.form().read().field(field).to_string()
}

pub fn store_uf(store: &CreatePointStore) -> String {
    store.form().read().uf.clone()
}

pub fn store_city(store: &CreatePointStore) -> String {
    store.form().read().city.clone()
}

pub fn store_position(store: &CreatePointStore) -> LatLng {
    store.form().read().position
}

pub fn store_is_item_selected(store: &CreatePointStore, item_id: u32) -> bool {
    store.form().read().is_selected(item_id)
}

/// Current form contents, without subscribing
pub fn store_form_snapshot(store: &CreatePointStore) -> PointForm {
    store.form().get_untracked()
}

/// Back to a blank session
pub fn store_reset(store: &CreatePointStore) {
    *store.write() = CreatePointState::default();
}
