#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bookshelf_db::{DbPool, DbRuntimeSettings};
use bookshelf_server::{app, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over an initialized on-disk store. The directory is kept alive
/// for as long as the fixture is.
pub struct TestApp {
    pub app: Router,
    pub pool: DbPool,
    pub db_path: String,
    _dir: TempDir,
}

pub fn settings() -> DbRuntimeSettings {
    DbRuntimeSettings {
        busy_timeout_ms: 1_000,
        pool_max_size: 2,
    }
}

pub fn seeded_app() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("books.db").to_string_lossy().into_owned();
    let pool = bookshelf_db::open_store(&db_path, settings()).expect("failed to open store");

    TestApp {
        app: app(AppState { pool: pool.clone() }),
        pool,
        db_path,
        _dir: dir,
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, json)
}
