//! Local filesystem upload provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use chemflow_core::config::storage::StorageConfig;
use chemflow_core::error::AppError;
use chemflow_core::result::AppResult;

use crate::provider::{StoredUpload, UploadStore};

/// Stores uploads under a configured directory with generated unique
/// filenames, serving them back under a public URL prefix.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    root: PathBuf,
    url_prefix: String,
    max_upload_bytes: u64,
}

impl LocalUploadStore {
    /// Creates the provider, ensuring the upload directory exists.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.upload_dir);
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create upload directory '{}': {e}",
                root.display()
            ))
        })?;

        Ok(Self {
            root,
            url_prefix: config.public_url_prefix.trim_end_matches('/').to_string(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// Generate a collision-free filename preserving the original extension.
    fn generate_filename(original_name: &str) -> String {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        format!("{}{ext}", Uuid::new_v4())
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(
        &self,
        original_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> AppResult<StoredUpload> {
        if data.len() as u64 > self.max_upload_bytes {
            return Err(AppError::validation(format!(
                "Upload '{original_name}' exceeds the {} byte limit",
                self.max_upload_bytes
            )));
        }

        let filename = Self::generate_filename(original_name);
        let path = self.root.join(&filename);
        let size_bytes = data.len() as u64;

        tokio::fs::write(&path, &data).await.map_err(|e| {
            AppError::storage(format!("Failed to write upload '{}': {e}", path.display()))
        })?;

        info!(
            filename = %filename,
            original_name = %original_name,
            size_bytes,
            "Upload stored"
        );

        Ok(StoredUpload {
            url: format!("{}/{filename}", self.url_prefix),
            filename,
            original_name: original_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
        })
    }

    async fn delete(&self, filename: &str) -> AppResult<()> {
        // Reject anything that could escape the upload directory.
        if filename.contains('/') || filename.contains("..") {
            return Err(AppError::validation(format!(
                "Invalid upload filename: '{filename}'"
            )));
        }

        let path = self.root.join(filename);
        tokio::fs::remove_file(&path).await.map_err(|e| {
            AppError::storage(format!("Failed to delete upload '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> StorageConfig {
        StorageConfig {
            upload_dir: dir.to_string_lossy().into_owned(),
            public_url_prefix: "/uploads".to_string(),
            max_upload_bytes: 1024,
        }
    }

    #[tokio::test]
    async fn test_store_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(&test_config(dir.path())).await.unwrap();

        let stored = store
            .store("report.pdf", "application/pdf", Bytes::from_static(b"data"))
            .await
            .unwrap();

        assert_eq!(stored.original_name, "report.pdf");
        assert_eq!(stored.size_bytes, 4);
        assert!(stored.filename.ends_with(".pdf"));
        assert!(stored.url.starts_with("/uploads/"));
        assert!(dir.path().join(&stored.filename).exists());

        store.delete(&stored.filename).await.unwrap();
        assert!(!dir.path().join(&stored.filename).exists());
    }

    #[tokio::test]
    async fn test_store_rejects_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(&test_config(dir.path())).await.unwrap();

        let big = Bytes::from(vec![0u8; 2048]);
        let err = store.store("big.bin", "application/octet-stream", big).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(&test_config(dir.path())).await.unwrap();
        assert!(store.delete("../etc/passwd").await.is_err());
    }
}
