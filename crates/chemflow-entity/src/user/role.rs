//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the ticket workflow.
///
/// `Admin` has full authority over every ticket, `Approver` moves tickets
/// through the review stages, `Requester` submits and edits their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Submits configuration change requests.
    Requester,
    /// Reviews and approves or rejects submitted requests.
    Approver,
    /// Full authority over tickets, users, and audit data.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "REQUESTER",
            Self::Approver => "APPROVER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = chemflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REQUESTER" => Ok(Self::Requester),
            "APPROVER" => Ok(Self::Approver),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(chemflow_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: REQUESTER, APPROVER, ADMIN"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("approver".parse::<UserRole>().unwrap(), UserRole::Approver);
        assert!("SUPERVISOR".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_wire_serialization() {
        let json = serde_json::to_string(&UserRole::Requester).unwrap();
        assert_eq!(json, "\"REQUESTER\"");
    }
}
