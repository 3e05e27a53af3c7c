//! Bookshelf server library logic.

pub mod api;
pub mod config;

use axum::{routing::get, Extension, Router};
use bookshelf_db::DbPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Handlers check out one connection per
    /// request and return it when the request finishes.
    pub pool: DbPool,
}

/// Builds the application router with all routes.
///
/// Only `GET` is served. Any other method on these paths, `HEAD` included,
/// gets a JSON `405`; unknown paths get a JSON `404`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/health",
            get(api::health_handler).head(api::method_not_allowed_fallback),
        )
        .route(
            "/api/books",
            get(api::list_books_handler).head(api::method_not_allowed_fallback),
        )
        .route(
            "/api/books/{id}",
            get(api::get_book_handler).head(api::method_not_allowed_fallback),
        )
        .method_not_allowed_fallback(api::method_not_allowed_fallback)
        .fallback(api::not_found_fallback)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
