use axum::extract::{Multipart, State};

use crate::api::state::AppState;
use crate::api::uploads::UploadStore;
use crate::api::v1::dto::{ExtractResponse, FormatsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::error::{DoctextError, Result};

/// `GET /api/v1/formats`
#[utoipa::path(
    get,
    path = "/api/v1/formats",
    tag = "extraction",
    operation_id = "formats.list",
    responses(
        (status = 200, description = "Supported document formats", body = FormatsResponse),
    )
)]
pub async fn list_formats(State(state): State<AppState>) -> ApiResponse<FormatsResponse> {
    ApiResponse::success(FormatsResponse::from_extensions(
        &state.extractor.supported_formats(),
    ))
}

/// `POST /api/v1/extract`
///
/// Accepts a multipart form with a `file` field, stores the upload, extracts
/// its text synchronously and writes an `_extracted.txt` artifact next to it.
#[utoipa::path(
    post,
    path = "/api/v1/extract",
    tag = "extraction",
    operation_id = "documents.extract",
    request_body(content_type = "multipart/form-data", content = String, description = "Document upload in a `file` field"),
    responses(
        (status = 200, description = "Extracted text and metadata", body = ExtractResponse),
        (status = 400, description = "Missing, unsupported, oversized or unreadable document", body = ApiError),
    )
)]
pub async fn extract_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<ExtractResponse> {
    let max_file_size = state.config.uploads.max_file_size;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        file_name = field.file_name().map(str::to_string);

        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => {
                return ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!("Failed to read file: {e}"),
                );
            }
        };

        if bytes.len() > max_file_size {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                format!(
                    "File too large: {} bytes (max {} bytes)",
                    bytes.len(),
                    max_file_size
                ),
            );
        }

        file_bytes = Some(bytes.to_vec());
    }

    let Some(bytes) = file_bytes else {
        return ApiResponse::error(ErrorCode::InvalidRequest, "No file provided");
    };

    let file_name = match file_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return ApiResponse::error(ErrorCode::InvalidRequest, "No file selected"),
    };

    if !state.extractor.is_supported(&file_name) {
        let allowed = FormatsResponse::from_extensions(&state.extractor.supported_formats())
            .formats
            .join(", ");
        return ApiResponse::error(
            ErrorCode::InvalidRequest,
            format!("Invalid file type. Please upload: {allowed}"),
        );
    }

    store_and_extract(&state, &file_name, bytes)
        .await
        .map_or_else(ApiResponse::from, ApiResponse::success)
}

async fn store_and_extract(
    state: &AppState,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<ExtractResponse> {
    let store = &state.uploads;
    store.ensure_dir().await?;

    let stored_name = store.stored_name(file_name);
    let stored_path = store.dir().join(&stored_name);
    tokio::fs::write(&stored_path, &bytes).await?;

    tracing::info!(file = %file_name, stored = %stored_name, "Stored upload");

    let extractor = state.extractor;
    let path = stored_path.clone();
    let extracted = tokio::task::spawn_blocking(move || extractor.extract(&path))
        .await
        .map_err(|e| DoctextError::Internal(format!("Extraction task failed: {e}")));

    let extraction = match extracted {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(e)) => {
            remove_quietly(&stored_path).await;
            return Err(e.into());
        }
        Err(e) => {
            remove_quietly(&stored_path).await;
            return Err(e);
        }
    };

    let text_file = UploadStore::sidecar_name(&stored_name);
    if let Err(e) = tokio::fs::write(store.dir().join(&text_file), &extraction.text).await {
        remove_quietly(&stored_path).await;
        return Err(e.into());
    }

    tracing::info!(
        stored = %stored_name,
        file_type = %extraction.metadata.file_type(),
        characters = extraction.metadata.characters,
        "Extracted upload"
    );

    Ok(ExtractResponse::new(
        extraction.text,
        extraction.metadata,
        stored_name,
        text_file,
    ))
}

async fn remove_quietly(path: &std::path::Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
    }
}
