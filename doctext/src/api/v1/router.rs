use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .route("/formats", get(handlers::extract::list_formats))
        .route("/extract", post(handlers::extract::extract_document))
        .route("/files/{name}", get(handlers::files::download_file))
        .route("/cleanup", post(handlers::files::cleanup_files))
}
