//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

use super::action::AuditAction;
use super::entity_type::AuditEntityType;

/// An immutable audit log entry recording one state-changing action.
///
/// Entries are write-once: nothing in the system mutates or deletes one
/// after it is persisted, and they survive deletion of their subject.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The action that was performed.
    pub action: AuditAction,
    /// The type of entity the action targeted.
    pub entity_type: AuditEntityType,
    /// The targeted entity's ID.
    pub entity_id: Uuid,
    /// The user who performed the action.
    pub user_id: Uuid,
    /// Actor's full name at the time of the action.
    pub user_name: String,
    /// Actor's role at the time of the action.
    pub user_role: UserRole,
    /// Sanitized snapshot of the entity before the action (if any).
    pub previous_value: Option<serde_json::Value>,
    /// Sanitized snapshot of the entity after the action (if any).
    pub new_value: Option<serde_json::Value>,
    /// Human-readable description of the action.
    pub details: String,
    /// When the action occurred (server-assigned; the ordering key).
    pub timestamp: DateTime<Utc>,
    /// IP address of the actor.
    pub ip_address: Option<String>,
    /// User-Agent of the actor.
    pub user_agent: Option<String>,
}
