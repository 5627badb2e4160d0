//! Uploaded Files
//!
//! Stores point images under the uploads directory and serves them back
//! with a MIME type guessed from the extension.

use std::io;
use std::path::Path;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::domain::DomainResult;
use crate::AppState;

/// Icons for the seeded item catalog
const CATALOG_IMAGES: [(&str, &[u8]); 6] = [
    ("lampadas.svg", include_bytes!("../../assets/items/lampadas.svg")),
    ("baterias.svg", include_bytes!("../../assets/items/baterias.svg")),
    ("papeis-papelao.svg", include_bytes!("../../assets/items/papeis-papelao.svg")),
    ("eletronicos.svg", include_bytes!("../../assets/items/eletronicos.svg")),
    ("organicos.svg", include_bytes!("../../assets/items/organicos.svg")),
    ("oleo.svg", include_bytes!("../../assets/items/oleo.svg")),
];

/// Write the catalog icons into `dir`, leaving existing files alone
pub async fn install_catalog_images(dir: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    for (name, content) in CATALOG_IMAGES {
        let path = dir.join(name);
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, content).await?;
        }
    }
    Ok(())
}

/// Result of [`store_upload`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub file_name: String,
    /// False when an identical upload already existed
    pub fresh: bool,
}

/// Save an uploaded image under a content-derived name
///
/// Names are `{content hash prefix}-{sanitized original name}`, so the same
/// file uploaded twice lands on the same name and is written once.
pub async fn store_upload(dir: &Path, original_name: &str, bytes: &[u8]) -> DomainResult<StoredUpload> {
    let hash = blake3::hash(bytes).to_hex();
    let file_name = format!("{}-{}", &hash.as_str()[..12], sanitize_file_name(original_name));
    let path = dir.join(&file_name);

    tokio::fs::create_dir_all(dir).await?;
    if tokio::fs::try_exists(&path).await? {
        log::info!("Reusing upload {}", file_name);
        return Ok(StoredUpload { file_name, fresh: false });
    }
    tokio::fs::write(&path, bytes).await?;
    log::info!("Stored upload {} ({} bytes)", file_name, bytes.len());

    Ok(StoredUpload { file_name, fresh: true })
}

/// Remove a stored upload whose point was never created
pub async fn discard_upload(dir: &Path, file_name: &str) {
    if let Err(e) = tokio::fs::remove_file(dir.join(file_name)).await {
        log::warn!("Failed to discard upload {}: {}", file_name, e);
    }
}

/// Keep only the last path component, restricted to `[A-Za-z0-9._-]`
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

/// `GET /uploads/{*path}`
pub async fn serve_upload(State(state): State<AppState>, UrlPath(path): UrlPath<String>) -> Response {
    // No escaping the uploads directory
    if path.split(['/', '\\']).any(|part| part == "..") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let file = state.uploads_dir.join(path.trim_start_matches('/'));
    match tokio::fs::read(&file).await {
        Ok(content) => {
            let mime_type = mime_guess::from_path(&file).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime_type.to_string())], content).into_response()
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            log::error!("Failed to read upload {}: {}", file.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
