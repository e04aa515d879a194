//! Response body DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use chemflow_entity::audit::AuditLogEntry;
use chemflow_entity::user::{Department, User, UserRole};

/// Public profile shape returned by auth and user endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Full display name.
    pub full_name: String,
    /// Workflow role.
    pub role: UserRole,
    /// Plant department.
    pub department: Department,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            department: user.department,
        }
    }
}

/// POST /api/auth/login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// Token expiration time.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user's profile.
    pub user: UserProfile,
}

/// One step in a ticket's status timeline.
#[derive(Debug, Clone, Serialize)]
pub struct StatusHistoryItem {
    /// Audit entry ID.
    pub id: Uuid,
    /// The ticket this step belongs to.
    pub ticket_id: Uuid,
    /// Status before the change (empty for malformed snapshots).
    pub previous_status: String,
    /// Status after the change.
    pub new_status: String,
    /// Actor's user ID.
    pub changed_by: Uuid,
    /// Actor's full name.
    pub changed_by_name: String,
    /// Actor's role.
    pub changed_by_role: UserRole,
    /// When the change happened.
    pub changed_at: DateTime<Utc>,
    /// Recorder-supplied description.
    pub comments: String,
}

impl From<&AuditLogEntry> for StatusHistoryItem {
    fn from(entry: &AuditLogEntry) -> Self {
        let status_of = |value: &Option<serde_json::Value>| {
            value
                .as_ref()
                .and_then(|v| v.get("status"))
                .and_then(|s| s.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            id: entry.id,
            ticket_id: entry.entity_id,
            previous_status: status_of(&entry.previous_value),
            new_status: status_of(&entry.new_value),
            changed_by: entry.user_id,
            changed_by_name: entry.user_name.clone(),
            changed_by_role: entry.user_role,
            changed_at: entry.timestamp,
            comments: entry.details.clone(),
        }
    }
}
