//! Ticket status enumeration and workflow ranking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a ticket.
///
/// Every ticket starts in `Draft`. `Approved` and `Rejected` share the same
/// workflow rank: neither is "forward" of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    /// Being drafted by the requester; not yet submitted.
    Draft,
    /// Submitted and awaiting review.
    Pending,
    /// Accepted by an approver or admin.
    Approved,
    /// Declined by an approver or admin.
    Rejected,
}

impl TicketStatus {
    /// All statuses, in workflow order.
    pub const ALL: [TicketStatus; 4] = [
        Self::Draft,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
    ];

    /// Position of this status in the workflow.
    ///
    /// `Draft`=0 < `Pending`=1 < {`Approved`, `Rejected`}=2.
    pub fn workflow_rank(&self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Pending => 1,
            Self::Approved | Self::Rejected => 2,
        }
    }

    /// Whether this is a terminal review outcome.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = chemflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(chemflow_core::AppError::validation(format!(
                "Invalid ticket status: '{s}'. Expected one of: DRAFT, PENDING, APPROVED, REJECTED"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(TicketStatus::Draft.workflow_rank() < TicketStatus::Pending.workflow_rank());
        assert!(TicketStatus::Pending.workflow_rank() < TicketStatus::Approved.workflow_rank());
        assert_eq!(
            TicketStatus::Approved.workflow_rank(),
            TicketStatus::Rejected.workflow_rank()
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "PENDING".parse::<TicketStatus>().unwrap(),
            TicketStatus::Pending
        );
        assert!("OPEN".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_wire_serialization() {
        let json = serde_json::to_string(&TicketStatus::Draft).unwrap();
        assert_eq!(json, "\"DRAFT\"");
    }
}
