//! Place routes backed by a SQLite file, as the binary runs them.

#![cfg(feature = "sqlite")]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pa_donde::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app(dir: &tempfile::TempDir) -> Router {
    let mut config = Config::default();
    config.database.url = format!("sqlite://{}", dir.path().join("places.db").display());

    let pool = connect_sqlite(&config.database).await.unwrap();
    let repository = SqlitePlaceRepository::new(pool);
    repository.migrate().await.unwrap();

    router(AppState::new(config, repository))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let body = body.map_or_else(Body::empty, |value| Body::from(value.to_string()));
    let request = Request::builder().method(method).uri(uri).body(body).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn crud_cycle_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir).await;

    let (status, body) = call(
        &app,
        "POST",
        "/places/",
        Some(json!({ "Name": "Cafe X", "Coordinates": { "Latitude": 12.1, "Longitude": -1.2 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body).unwrap();
    let id = created["ID"].as_i64().unwrap();
    assert!(id > 0);

    let (status, body) = call(&app, "PUT", &format!("/places/{id}"), Some(json!({ "Name": "Cafe Y" }))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["Name"], "Cafe Y");
    assert_eq!(updated["Coordinates"]["Latitude"], 0.0);

    let (status, body) = call(&app, "GET", "/places/1-10", None).await;
    assert_eq!(status, StatusCode::OK);
    let page: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(page.as_array().unwrap().len(), 1);

    let (status, _) = call(&app, "DELETE", &format!("/places/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "DELETE", &format!("/places/{id}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = call(&app, "GET", "/places/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn places_survive_reconnect() {
    let dir = tempfile::tempdir().unwrap();

    let first = app(&dir).await;
    let (status, _) = call(&first, "POST", "/places", Some(json!({ "Name": "kept" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = app(&dir).await;
    let (status, body) = call(&second, "GET", "/places/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap()["Name"], "kept");
}
