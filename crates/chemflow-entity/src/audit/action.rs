//! Audit action enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of action an audit entry records.
///
/// The set is closed: anything outside it is rejected when parsed at the
/// API boundary, so an invalid action can never reach the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// An entity was created.
    Create,
    /// An entity's fields were updated.
    Update,
    /// An entity was deleted.
    Delete,
    /// A ticket moved between workflow statuses.
    StatusChange,
    /// An entity was viewed (available for callers that track reads).
    View,
    /// A user logged in.
    Login,
    /// A user logged out.
    Logout,
    /// A ticket was approved (supplementary to `StatusChange`).
    Approve,
    /// A ticket was rejected (supplementary to `StatusChange`).
    Reject,
}

impl AuditAction {
    /// Return the action as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::StatusChange => "STATUS_CHANGE",
            Self::View => "VIEW",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = chemflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "STATUS_CHANGE" => Ok(Self::StatusChange),
            "VIEW" => Ok(Self::View),
            "LOGIN" => Ok(Self::Login),
            "LOGOUT" => Ok(Self::Logout),
            "APPROVE" => Ok(Self::Approve),
            "REJECT" => Ok(Self::Reject),
            _ => Err(chemflow_core::AppError::validation(format!(
                "Invalid audit action: '{s}'"
            ))),
        }
    }
}
