use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::state::AppState;
use crate::api::v1::dto::{CleanupRequest, CleanupResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};

/// `GET /api/v1/files/{name}`
///
/// Downloads a stored upload or its extracted-text artifact as an attachment.
#[utoipa::path(
    get,
    path = "/api/v1/files/{name}",
    tag = "files",
    operation_id = "files.download",
    params(("name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = ApiError),
    )
)]
pub async fn download_file(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let not_found = || {
        ApiResponse::<()>::error(ErrorCode::NotFound, format!("File not found: {name}"))
            .into_response()
    };

    let Some(path) = state.uploads.resolve(&name) else {
        return not_found();
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Download failed");
            return not_found();
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    (
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        Body::from(bytes),
    )
        .into_response()
}

/// `POST /api/v1/cleanup`
///
/// Deletes the listed stored files. Names that do not exist are skipped.
#[utoipa::path(
    post,
    path = "/api/v1/cleanup",
    tag = "files",
    operation_id = "files.cleanup",
    request_body = CleanupRequest,
    responses(
        (status = 200, description = "Files removed", body = CleanupResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn cleanup_files(
    State(state): State<AppState>,
    Json(req): Json<CleanupRequest>,
) -> ApiResponse<CleanupResponse> {
    let mut deleted = Vec::new();

    for name in req.files {
        let Some(path) = state.uploads.resolve(&name) else {
            continue;
        };
        if !path.is_file() {
            continue;
        }
        match tokio::fs::remove_file(&path).await {
            Ok(()) => deleted.push(name),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to delete file");
            }
        }
    }

    tracing::info!(count = deleted.len(), "Cleaned up stored files");
    ApiResponse::success(CleanupResponse { deleted })
}
