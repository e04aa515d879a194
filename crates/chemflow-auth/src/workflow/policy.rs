//! Workflow transition enforcement: decides whether a role may move a
//! ticket between statuses.
//!
//! Pure functions, no I/O. Callers must not present no-op transitions
//! (`current == target`); those are "no status change" and are handled by
//! the general update gate in the ticket service.

use chemflow_core::error::AppError;
use chemflow_entity::ticket::TicketStatus;
use chemflow_entity::user::UserRole;

/// Whether moving from `current` to `target` is forward in the workflow.
///
/// `Approved` and `Rejected` share a rank, so neither is forward of the
/// other.
pub fn is_forward_movement(current: TicketStatus, target: TicketStatus) -> bool {
    target.workflow_rank() > current.workflow_rank()
}

/// Whether a user with `role` may move a ticket from `current` to `target`.
///
/// Rules, in priority order:
/// 1. Admins may move any ticket in any direction.
/// 2. Approvers may move their own tickets freely, except backward out of
///    `Approved`/`Rejected` into `Pending`/`Draft`. On other people's
///    tickets they may only move strictly forward, and never out of
///    `Draft`.
/// 3. Requesters may only submit their own drafts (`Draft` → `Pending`).
pub fn can_transition(
    role: UserRole,
    is_own_ticket: bool,
    current: TicketStatus,
    target: TicketStatus,
) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Approver => {
            if is_own_ticket {
                // No un-approving or un-rejecting your own ticket.
                !(current.is_resolved()
                    && matches!(target, TicketStatus::Pending | TicketStatus::Draft))
            } else {
                current != TicketStatus::Draft && is_forward_movement(current, target)
            }
        }
        UserRole::Requester => {
            is_own_ticket && current == TicketStatus::Draft && target == TicketStatus::Pending
        }
    }
}

/// Checks a transition and returns a Forbidden error when it is denied.
pub fn require_transition(
    role: UserRole,
    is_own_ticket: bool,
    current: TicketStatus,
    target: TicketStatus,
) -> Result<(), AppError> {
    if can_transition(role, is_own_ticket, current, target) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role '{role}' may not move this ticket from {current} to {target}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemflow_entity::ticket::TicketStatus::{Approved, Draft, Pending, Rejected};

    #[test]
    fn test_forward_movement_is_antisymmetric() {
        for a in TicketStatus::ALL {
            for b in TicketStatus::ALL {
                if is_forward_movement(a, b) {
                    assert!(
                        !is_forward_movement(b, a),
                        "both {a}->{b} and {b}->{a} claimed forward"
                    );
                }
            }
        }
    }

    #[test]
    fn test_approved_rejected_are_siblings() {
        assert!(!is_forward_movement(Approved, Rejected));
        assert!(!is_forward_movement(Rejected, Approved));
    }

    #[test]
    fn test_admin_can_do_anything() {
        for own in [true, false] {
            for current in TicketStatus::ALL {
                for target in TicketStatus::ALL {
                    assert!(can_transition(UserRole::Admin, own, current, target));
                }
            }
        }
    }

    #[test]
    fn test_requester_only_submits_own_draft() {
        assert!(can_transition(UserRole::Requester, true, Draft, Pending));

        for own in [true, false] {
            for current in TicketStatus::ALL {
                for target in TicketStatus::ALL {
                    if own && current == Draft && target == Pending {
                        continue;
                    }
                    assert!(
                        !can_transition(UserRole::Requester, own, current, target),
                        "requester unexpectedly allowed: own={own} {current}->{target}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_approver_cannot_reopen_own_resolved_ticket() {
        assert!(!can_transition(UserRole::Approver, true, Approved, Pending));
        assert!(!can_transition(UserRole::Approver, true, Approved, Draft));
        assert!(!can_transition(UserRole::Approver, true, Rejected, Pending));
        assert!(!can_transition(UserRole::Approver, true, Rejected, Draft));
    }

    #[test]
    fn test_approver_moves_own_ticket_otherwise_freely() {
        assert!(can_transition(UserRole::Approver, true, Draft, Rejected));
        assert!(can_transition(UserRole::Approver, true, Draft, Pending));
        assert!(can_transition(UserRole::Approver, true, Pending, Draft));
        assert!(can_transition(UserRole::Approver, true, Pending, Approved));
        assert!(can_transition(UserRole::Approver, true, Approved, Rejected));
        assert!(can_transition(UserRole::Approver, true, Rejected, Approved));
    }

    #[test]
    fn test_approver_forward_only_on_others() {
        assert!(can_transition(UserRole::Approver, false, Pending, Approved));
        assert!(can_transition(UserRole::Approver, false, Pending, Rejected));
        assert!(!can_transition(UserRole::Approver, false, Approved, Pending));
        assert!(!can_transition(UserRole::Approver, false, Rejected, Pending));
        assert!(!can_transition(UserRole::Approver, false, Approved, Rejected));
    }

    #[test]
    fn test_approver_never_moves_others_drafts() {
        for target in [Pending, Approved, Rejected] {
            assert!(!can_transition(UserRole::Approver, false, Draft, target));
        }
    }

    #[test]
    fn test_require_transition_error_kind() {
        let err = require_transition(UserRole::Requester, false, Pending, Approved).unwrap_err();
        assert_eq!(err.kind, chemflow_core::ErrorKind::Forbidden);
        assert!(require_transition(UserRole::Admin, false, Approved, Draft).is_ok());
    }
}
