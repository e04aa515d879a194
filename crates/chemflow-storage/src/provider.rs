//! Upload store trait and metadata shape.

use async_trait::async_trait;
use bytes::Bytes;

use chemflow_core::result::AppResult;

/// Metadata about one stored upload.
///
/// This is the only shape the rest of the system consumes; where the bytes
/// actually live is the provider's concern.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredUpload {
    /// Provider-assigned unique filename.
    pub filename: String,
    /// Original filename as uploaded.
    pub original_name: String,
    /// MIME type reported by the client.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// URL under which the upload is served.
    pub url: String,
}

/// Trait for attachment upload backends.
#[async_trait]
pub trait UploadStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist one uploaded file and return its metadata.
    async fn store(
        &self,
        original_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> AppResult<StoredUpload>;

    /// Delete a stored upload by its provider-assigned filename.
    async fn delete(&self, filename: &str) -> AppResult<()>;
}
