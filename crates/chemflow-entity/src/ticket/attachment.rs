//! File attachment value object embedded in a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for one uploaded file attached to a ticket.
///
/// Attachments are append-only: new uploads are added to the end of the
/// ticket's attachment list and existing entries are never replaced or
/// reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Storage-assigned identifier (the generated filename).
    pub id: String,
    /// Original filename as uploaded.
    pub name: String,
    /// URL under which the file is served.
    pub url: String,
    /// MIME type reported at upload time.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// User who uploaded the file.
    pub uploaded_by: Uuid,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
}
