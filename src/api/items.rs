//! Item Catalog

use crate::models::Item;
use super::api_url;

pub async fn list_items() -> Result<Vec<Item>, String> {
    let response = reqwest::get(api_url("items"))
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;
    response.json::<Vec<Item>>().await.map_err(|e| e.to_string())
}
