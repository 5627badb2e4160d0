//! HTTP API tests
//!
//! Drive the full router with in-memory SQLite and a temporary uploads dir.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use ecoleta_server::repository::init_db;
use ecoleta_server::{build_router, AppState};

const BOUNDARY: &str = "ecoleta-test-boundary";

async fn setup() -> (Router, TempDir) {
    let uploads = tempfile::tempdir().expect("Failed to create uploads dir");
    let db_state = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
    let state = AppState::new(
        db_state,
        uploads.path().to_path_buf(),
        "http://localhost:3333".to_string(),
    );
    (build_router(state), uploads)
}

fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn point_fields<'a>(name: &'a str, uf: &'a str, city: &'a str, items: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("email", "contato@ecoleta.test"),
        ("whatsapp", "11912345678"),
        ("uf", uf),
        ("city", city),
        ("latitude", "-23.5505"),
        ("longitude", "-46.6333"),
        ("items", items),
    ]
}

async fn post_point(app: &Router, fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/points")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(fields, image)))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_returns_exact_message() {
    let (app, _uploads) = setup().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Servidor UP!" }));
}

#[tokio::test]
async fn test_list_items_includes_image_urls() {
    let (app, _uploads) = setup().await;

    let (status, body) = get(&app, "/items").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(
        items[0],
        json!({
            "id": 1,
            "title": "Lâmpadas",
            "image_url": "http://localhost:3333/uploads/lampadas.svg"
        })
    );
}

#[tokio::test]
async fn test_create_point_with_image() {
    let (app, uploads) = setup().await;

    let (status, created) = post_point(
        &app,
        &point_fields("Mercado Verde", "SP", "Campinas", "1,2,3"),
        Some(("fachada.png", b"\x89PNG fake".as_slice())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Mercado Verde");
    assert_eq!(created["latitude"], -23.5505);
    assert_eq!(created["items"], json!([1, 2, 3]));

    let image = created["image"].as_str().unwrap().to_string();
    assert!(image.ends_with("-fachada.png"));
    assert_eq!(
        created["image_url"],
        format!("http://localhost:3333/uploads/{}", image)
    );
    assert!(uploads.path().join(&image).exists());

    let id = created["id"].as_u64().unwrap();
    let (status, detail) = get(&app, &format!("/points/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["point"]["city"], "Campinas");
    let titles: Vec<&str> = detail["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Lâmpadas", "Pilhas e Baterias", "Papéis e Papelão"]);

    let request = Request::builder()
        .uri(format!("/uploads/{}", image))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNG fake");
}

#[tokio::test]
async fn test_create_point_without_image() {
    let (app, _uploads) = setup().await;

    let (status, created) = post_point(&app, &point_fields("Ecoponto", "RJ", "Niterói", ""), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["image"], Value::Null);
    assert_eq!(created["image_url"], Value::Null);
    assert_eq!(created["items"], json!([]));
}

#[tokio::test]
async fn test_create_point_rejects_bad_input() {
    let (app, uploads) = setup().await;

    let (status, body) = post_point(
        &app,
        &point_fields("Fantasma", "SP", "Santos", "1,99"),
        Some(("foto.png", b"bytes".as_slice())),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("99"));
    // The image of a rejected point is not kept
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);

    let mut fields = point_fields("Sem mapa", "SP", "Santos", "1");
    fields[5] = ("latitude", "norte");
    let (status, _) = post_point(&app, &fields, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, points) = get(&app, "/points").await;
    assert_eq!(points, json!([]));
}

#[tokio::test]
async fn test_filter_points() {
    let (app, _uploads) = setup().await;

    post_point(&app, &point_fields("A", "SP", "Campinas", "1"), None).await;
    post_point(&app, &point_fields("B", "SP", "Santos", "2"), None).await;
    post_point(&app, &point_fields("C", "RJ", "Niterói", "1,2"), None).await;

    let names = |body: Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = get(&app, "/points?uf=SP").await;
    assert_eq!(names(body), vec!["A", "B"]);

    let (_, body) = get(&app, "/points?items=2").await;
    assert_eq!(names(body), vec!["B", "C"]);

    let (_, body) = get(&app, "/points?uf=SP&city=Campinas&items=1,2").await;
    assert_eq!(names(body), vec!["A"]);

    let (status, _) = get(&app, "/points?items=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_resources() {
    let (app, _uploads) = setup().await;

    let (status, body) = get(&app, "/points/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = get(&app, "/uploads/nothing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/uploads/a/../../secret.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rejected_point_keeps_shared_image() {
    let (app, uploads) = setup().await;
    let photo = b"same photo".as_slice();

    let (status, created) = post_point(
        &app,
        &point_fields("Primeiro", "SP", "Campinas", "1"),
        Some(("foto.png", photo)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let image = created["image"].as_str().unwrap().to_string();

    let (status, _) = post_point(
        &app,
        &point_fields("Segundo", "SP", "Campinas", "77"),
        Some(("foto.png", photo)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(uploads.path().join(&image).exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rejections_keep_shared_image() {
    let (app, uploads) = setup().await;
    let photo = b"popular photo".as_slice();

    let mut tasks = Vec::new();
    for round in 0..16 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            // Odd rounds reference an unknown item and are rejected
            let items = if round % 2 == 0 { "1" } else { "99" };
            let name = format!("Ponto {}", round);
            post_point(&app, &point_fields(&name, "SP", "Campinas", items), Some(("foto.png", photo))).await
        }));
    }

    let mut images = Vec::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        if status == StatusCode::CREATED {
            images.push(body["image"].as_str().unwrap().to_string());
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    assert_eq!(images.len(), 8);
    for image in images {
        assert!(uploads.path().join(&image).exists());
    }
}
