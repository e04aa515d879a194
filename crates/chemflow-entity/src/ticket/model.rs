//! Ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::Department;

use super::attachment::Attachment;
use super::status::TicketStatus;

/// A chemical-configuration change request moving through the approval
/// workflow.
///
/// `requester_id`, `department`, and `request_date` are fixed at creation;
/// no update path writes them again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: Uuid,
    /// Short summary of the request.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Opaque machine chemical configuration payload.
    ///
    /// Not validated beyond presence; the machine parameters inside are the
    /// requester's responsibility.
    pub chemical_config: serde_json::Value,
    /// Uploaded file attachments, append-only.
    pub attachments: Vec<Attachment>,
    /// Current workflow status.
    pub status: TicketStatus,
    /// Owning user, set at creation.
    pub requester_id: Uuid,
    /// Requester's department at creation time.
    pub department: Department,
    /// When the request was created.
    pub request_date: DateTime<Utc>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Check whether the given user owns this ticket.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id
    }
}

