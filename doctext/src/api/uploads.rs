//! On-disk storage for uploaded documents and their extracted-text sidecars.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::processing::extension_of;

const SIDECAR_SUFFIX: &str = "_extracted.txt";
const FALLBACK_STEM: &str = "upload";

/// Reduces a client-supplied file name to a safe ASCII name.
///
/// Directory components are dropped, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is removed and leading/trailing `.`/`_` are trimmed.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// `<uuid>_<sanitized stem><lowercased extension>`
    pub fn stored_name(&self, original: &str) -> String {
        let original = Path::new(original);
        let extension = extension_of(original);
        let stem = original
            .file_stem()
            .map(|s| sanitize_file_name(&s.to_string_lossy()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());
        format!("{}_{}{}", Uuid::new_v4(), stem, extension)
    }

    /// Name of the text artifact written next to a stored upload.
    pub fn sidecar_name(stored_name: &str) -> String {
        let stem = Path::new(stored_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| stored_name.to_string());
        format!("{stem}{SIDECAR_SUFFIX}")
    }

    /// Maps a client-supplied name onto a path inside the store.
    ///
    /// Only the final path component is honoured, so `../secret` and
    /// `/etc/passwd` both stay confined to the upload directory.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let file_name = Path::new(name).file_name()?;
        Some(self.dir.join(file_name))
    }
}
