//! Attachment storage configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the local attachment upload store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded attachments are written.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL prefix under which uploads are served back to clients.
    #[serde(default = "default_url_prefix")]
    pub public_url_prefix: String,
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_url_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_upload_bytes() -> u64 {
    25 * 1024 * 1024
}
