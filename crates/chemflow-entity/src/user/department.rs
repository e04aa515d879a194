//! Department enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plant department a user belongs to.
///
/// Copied onto each ticket at creation time and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "department", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    /// Production line operations.
    Production,
    /// Quality assurance.
    Quality,
    /// Equipment maintenance.
    Maintenance,
    /// Process engineering.
    Engineering,
}

impl Department {
    /// Return the department as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "PRODUCTION",
            Self::Quality => "QUALITY",
            Self::Maintenance => "MAINTENANCE",
            Self::Engineering => "ENGINEERING",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Department {
    type Err = chemflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PRODUCTION" => Ok(Self::Production),
            "QUALITY" => Ok(Self::Quality),
            "MAINTENANCE" => Ok(Self::Maintenance),
            "ENGINEERING" => Ok(Self::Engineering),
            _ => Err(chemflow_core::AppError::validation(format!(
                "Invalid department: '{s}'"
            ))),
        }
    }
}
