use serde::{Deserialize, Serialize};

/// Request body of `POST /v1/cleanup`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CleanupRequest {
    /// Stored file names to delete. Unknown names are ignored.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Response body of `POST /v1/cleanup`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CleanupResponse {
    /// Names that were actually removed.
    pub deleted: Vec<String>,
}
