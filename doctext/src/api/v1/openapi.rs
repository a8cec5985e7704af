use axum::Json;
use utoipa::OpenApi;

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Doctext API",
        version = "1.0.0",
        description = "Plain-text and metadata extraction for PDF, Word, PowerPoint and Excel documents.",
    ),
    paths(
        handlers::health::health_check,
        handlers::extract::list_formats,
        handlers::extract::extract_document,
        handlers::files::download_file,
        handlers::files::cleanup_files,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        crate::models::FileType,
        dto::ExtractResponse,
        dto::FormatsResponse,
        dto::CleanupRequest,
        dto::CleanupResponse,
        handlers::health::HealthData,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "extraction", description = "Document upload and text extraction"),
        (name = "files", description = "Download and cleanup of stored uploads"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
