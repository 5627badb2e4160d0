//! Collection point endpoints

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ItemView, NewPoint, PointFilter, PointView};
use crate::repository::Repository;
use crate::AppState;
use super::error::{ApiError, ApiResult};
use super::uploads::{discard_upload, store_upload};

/// Response of `GET /points/{id}`
#[derive(Debug, Serialize, Deserialize)]
pub struct PointDetail {
    pub point: PointView,
    pub items: Vec<ItemView>,
}

fn bad_multipart(e: MultipartError) -> ApiError {
    ApiError(DomainError::InvalidInput(format!("malformed multipart body: {}", e)))
}

/// `POST /points`
///
/// Text fields: name, email, whatsapp, uf, city, latitude, longitude, items
/// (comma-joined ids). Optional file field: image.
pub async fn create_point(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<PointView>)> {
    let mut fields = HashMap::new();
    let mut image: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            // Browsers send an empty part when no file was chosen
            if !bytes.is_empty() {
                image = Some((file_name, bytes));
            }
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            fields.insert(name, value);
        }
    }

    let mut new_point = NewPoint::from_fields(&fields)?;

    // Identical images share one file; another request must not reuse it
    // between our write and a discard
    let uploads_guard = state.upload_lock.lock().await;
    let mut stored = None;
    if let Some((file_name, bytes)) = image {
        let upload = store_upload(&state.uploads_dir, &file_name, &bytes).await?;
        new_point.image = Some(upload.file_name.clone());
        stored = Some(upload);
    }

    let point = match state.point_repo.create(&new_point).await {
        Ok(point) => point,
        Err(e) => {
            if let Some(upload) = stored.filter(|u| u.fresh) {
                discard_upload(&state.uploads_dir, &upload.file_name).await;
            }
            return Err(e.into());
        }
    };
    drop(uploads_guard);
    log::info!(
        "Created point {} '{}' in {}/{} with {} items",
        point.id,
        point.name,
        point.city,
        point.uf,
        new_point.items.len()
    );

    let item_ids = state.point_repo.item_ids(point.id).await?;
    Ok((StatusCode::CREATED, Json(point.to_view(&state.public_url, item_ids))))
}

/// `GET /points?city=&uf=&items=`
pub async fn list_points(
    State(state): State<AppState>,
    Query(filter): Query<PointFilter>,
) -> ApiResult<Json<Vec<PointView>>> {
    let points = state.point_repo.filter(&filter).await?;

    let mut views = Vec::with_capacity(points.len());
    for point in points {
        let item_ids = state.point_repo.item_ids(point.id).await?;
        views.push(point.to_view(&state.public_url, item_ids));
    }
    Ok(Json(views))
}

/// `GET /points/{id}`
pub async fn get_point(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<PointDetail>> {
    let point = state
        .point_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("point {}", id)))?;

    let items = state.item_repo.find_by_point(id).await?;
    let item_ids = items.iter().map(|item| item.id).collect();

    Ok(Json(PointDetail {
        point: point.to_view(&state.public_url, item_ids),
        items: items.iter().map(|item| item.to_view(&state.public_url)).collect(),
    }))
}
