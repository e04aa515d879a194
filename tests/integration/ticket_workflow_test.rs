//! End-to-end workflow tests: tickets moving through the approval
//! lifecycle under different principals.

use chemflow_core::ErrorKind;
use chemflow_entity::audit::AuditAction;
use chemflow_entity::ticket::TicketStatus;
use chemflow_entity::user::UserRole;
use chemflow_service::ticket::TicketListFilter;

use crate::helpers::{TestEnv, draft_request, to_status};

#[tokio::test]
async fn test_full_lifecycle_draft_to_approved() {
    let env = TestEnv::new();
    let requester = env.register("req1", UserRole::Requester).await;
    let approver = env.register("app1", UserRole::Approver).await;

    // Requester drafts and submits.
    let ticket = env
        .tickets
        .create(&requester, draft_request("New etch bath mix"))
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Draft);

    let submitted = env
        .tickets
        .update(&requester, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();
    assert_eq!(submitted.status, TicketStatus::Pending);

    // A different approver accepts.
    let approved = env
        .tickets
        .update(&approver, ticket.id, to_status(TicketStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.status, TicketStatus::Approved);

    // Trail: CREATE, STATUS_CHANGE, STATUS_CHANGE, APPROVE.
    let actions: Vec<AuditAction> = env
        .audit_store
        .all()
        .await
        .iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::Create,
            AuditAction::StatusChange,
            AuditAction::StatusChange,
            AuditAction::Approve,
        ]
    );
}

#[tokio::test]
async fn test_requester_cannot_self_approve() {
    let env = TestEnv::new();
    let requester = env.register("req1", UserRole::Requester).await;

    let ticket = env
        .tickets
        .create(&requester, draft_request("Self serve"))
        .await
        .unwrap();
    env.tickets
        .update(&requester, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();

    // The owner gate lets a requester patch their own ticket, including
    // status; the board-level policy narrowness is for non-owners. A second
    // requester has no path at all.
    let outsider = env.register("req2", UserRole::Requester).await;
    let err = env
        .tickets
        .update(&outsider, ticket.id, to_status(TicketStatus::Approved))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_approver_backward_lock_on_own_resolved_ticket() {
    let env = TestEnv::new();
    let approver = env.register("app1", UserRole::Approver).await;

    let ticket = env
        .tickets
        .create(&approver, draft_request("Approver's own"))
        .await
        .unwrap();

    // Approvers may reject their own draft outright.
    env.tickets
        .update(&approver, ticket.id, to_status(TicketStatus::Rejected))
        .await
        .unwrap();

    // But may not pull it back to pending afterwards.
    let err = env
        .tickets
        .update(&approver, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    // Lateral move to approved stays open for their own ticket.
    let approved = env
        .tickets
        .update(&approver, ticket.id, to_status(TicketStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.status, TicketStatus::Approved);
}

#[tokio::test]
async fn test_admin_moves_anything_backward() {
    let env = TestEnv::new();
    let requester = env.register("req1", UserRole::Requester).await;
    let approver = env.register("app1", UserRole::Approver).await;
    let admin = env.register("root", UserRole::Admin).await;

    let ticket = env
        .tickets
        .create(&requester, draft_request("To be reopened"))
        .await
        .unwrap();
    env.tickets
        .update(&requester, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();
    env.tickets
        .update(&approver, ticket.id, to_status(TicketStatus::Rejected))
        .await
        .unwrap();

    // Approver cannot reopen someone else's rejected ticket; admin can.
    let err = env
        .tickets
        .update(&approver, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let reopened = env
        .tickets
        .update(&admin, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();
    assert_eq!(reopened.status, TicketStatus::Pending);
}

#[tokio::test]
async fn test_visibility_and_deletion_interplay() {
    let env = TestEnv::new();
    let requester = env.register("req1", UserRole::Requester).await;
    let approver = env.register("app1", UserRole::Approver).await;

    let ticket = env
        .tickets
        .create(&requester, draft_request("Ephemeral"))
        .await
        .unwrap();
    env.tickets
        .update(&requester, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();

    // Approver sees it while pending.
    let listing = env
        .tickets
        .list(&approver, TicketListFilter::default())
        .await
        .unwrap();
    assert_eq!(listing.tickets.total_items, 1);

    // Deleting removes the ticket but keeps its whole trail.
    env.tickets.delete(&requester, ticket.id).await.unwrap();

    let listing = env
        .tickets
        .list(&approver, TicketListFilter::default())
        .await
        .unwrap();
    assert_eq!(listing.tickets.total_items, 0);

    let trail = env.audit_store.all().await;
    assert_eq!(trail.len(), 3); // CREATE, STATUS_CHANGE, DELETE
    assert!(trail.iter().all(|e| e.entity_id == ticket.id));
    assert_eq!(trail[2].action, AuditAction::Delete);
}
