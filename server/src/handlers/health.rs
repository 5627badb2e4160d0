//! Health check

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// `GET /`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { message: "Servidor UP!" })
}
