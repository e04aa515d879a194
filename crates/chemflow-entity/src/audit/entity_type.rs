//! Audited entity type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_entity_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEntityType {
    /// A workflow ticket.
    Ticket,
    /// A user account.
    User,
    /// A chemical configuration payload.
    ChemicalConfig,
    /// A file attachment.
    Attachment,
    /// The system itself (logins, startup events).
    System,
}

impl AuditEntityType {
    /// Return the entity type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "TICKET",
            Self::User => "USER",
            Self::ChemicalConfig => "CHEMICAL_CONFIG",
            Self::Attachment => "ATTACHMENT",
            Self::System => "SYSTEM",
        }
    }
}

impl fmt::Display for AuditEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditEntityType {
    type Err = chemflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TICKET" => Ok(Self::Ticket),
            "USER" => Ok(Self::User),
            "CHEMICAL_CONFIG" => Ok(Self::ChemicalConfig),
            "ATTACHMENT" => Ok(Self::Attachment),
            "SYSTEM" => Ok(Self::System),
            _ => Err(chemflow_core::AppError::validation(format!(
                "Invalid entity type: '{s}'"
            ))),
        }
    }
}
