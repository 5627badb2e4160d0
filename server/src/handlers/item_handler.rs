//! Item catalog endpoints

use axum::extract::State;
use axum::Json;

use crate::domain::ItemView;
use crate::repository::Repository;
use crate::AppState;
use super::error::ApiResult;

/// `GET /items`
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<ItemView>>> {
    let items = state.item_repo.list().await?;
    Ok(Json(
        items.iter().map(|item| item.to_view(&state.public_url)).collect(),
    ))
}
