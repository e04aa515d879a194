//! Audit trail tests: ordering, filtering, and query authorization.

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use chemflow_core::ErrorKind;
use chemflow_core::types::pagination::PageRequest;
use chemflow_database::memory::MemoryAuditLogStore;
use chemflow_database::store::AuditLogStore;
use chemflow_entity::audit::{AuditAction, AuditEntityType, AuditLogEntry};
use chemflow_entity::ticket::TicketStatus;
use chemflow_entity::user::UserRole;
use chemflow_service::audit::ActivityQueryService;

use crate::helpers::{TestEnv, draft_request, start_time, to_status};

/// Build a STATUS_CHANGE entry with an explicit timestamp.
fn status_change_at(
    ticket_id: Uuid,
    offset_seconds: i64,
    details: &str,
) -> AuditLogEntry {
    AuditLogEntry {
        id: Uuid::new_v4(),
        action: AuditAction::StatusChange,
        entity_type: AuditEntityType::Ticket,
        entity_id: ticket_id,
        user_id: Uuid::new_v4(),
        user_name: "Backfill".to_string(),
        user_role: UserRole::Admin,
        previous_value: None,
        new_value: None,
        details: details.to_string(),
        timestamp: start_time() + Duration::seconds(offset_seconds),
        ip_address: None,
        user_agent: None,
    }
}

#[tokio::test]
async fn test_status_history_ascending_regardless_of_insertion_order() {
    let env = TestEnv::new();
    let viewer = env.register("viewer", UserRole::Requester).await;
    let ticket_id = Uuid::new_v4();

    // Inserted out of order: t2, t1, t3.
    env.audit_store
        .insert(&status_change_at(ticket_id, 20, "t2"))
        .await
        .unwrap();
    env.audit_store
        .insert(&status_change_at(ticket_id, 10, "t1"))
        .await
        .unwrap();
    env.audit_store
        .insert(&status_change_at(ticket_id, 30, "t3"))
        .await
        .unwrap();

    let history = env.activity.status_history(&viewer, ticket_id).await;
    let order: Vec<&str> = history.iter().map(|e| e.details.as_str()).collect();
    assert_eq!(order, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_status_history_filters_other_actions_and_tickets() {
    let env = TestEnv::new();
    let requester = env.register("req1", UserRole::Requester).await;

    let first = env
        .tickets
        .create(&requester, draft_request("first"))
        .await
        .unwrap();
    let second = env
        .tickets
        .create(&requester, draft_request("second"))
        .await
        .unwrap();

    env.tickets
        .update(&requester, first.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();
    env.tickets
        .update(&requester, second.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();

    let history = env.activity.status_history(&requester, first.id).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, AuditAction::StatusChange);
    assert_eq!(history[0].entity_id, first.id);
}

#[tokio::test]
async fn test_status_history_range_count_and_pagination() {
    let env = TestEnv::new();
    let viewer = env.register("viewer", UserRole::Requester).await;
    let ticket_id = Uuid::new_v4();

    for offset in [10, 20, 30, 40, 50] {
        env.audit_store
            .insert(&status_change_at(ticket_id, offset, &format!("t{offset}")))
            .await
            .unwrap();
    }

    let start = start_time() + Duration::seconds(15);
    let end = start_time() + Duration::seconds(45);
    let page = PageRequest::new(1, 2);

    let (total, entries) = env
        .activity
        .status_history_in_range(&viewer, ticket_id, start, end, &page)
        .await;

    // Three entries fall inside the window; the page holds the first two.
    assert_eq!(total, 3);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].details, "t20");
    assert_eq!(entries[1].details, "t30");
}

#[tokio::test]
async fn test_recent_activity_descending_and_admin_gated() {
    let env = TestEnv::new();
    let requester = env.register("req1", UserRole::Requester).await;
    let admin = env.register("root", UserRole::Admin).await;

    let ticket = env
        .tickets
        .create(&requester, draft_request("noise"))
        .await
        .unwrap();
    env.tickets
        .update(&requester, ticket.id, to_status(TicketStatus::Pending))
        .await
        .unwrap();

    let err = env
        .activity
        .recent_activity(&requester, &PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let recent = env
        .activity
        .recent_activity(&admin, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].timestamp >= recent[1].timestamp);
    assert_eq!(recent[0].action, AuditAction::StatusChange);
}

#[tokio::test]
async fn test_user_activity_lists_only_that_actor() {
    let env = TestEnv::new();
    let alice = env.register("alice", UserRole::Requester).await;
    let bob = env.register("bob", UserRole::Requester).await;

    env.tickets
        .create(&alice, draft_request("alice's"))
        .await
        .unwrap();
    env.tickets
        .create(&bob, draft_request("bob's"))
        .await
        .unwrap();

    let mine = env
        .activity
        .user_activity(&alice, alice.user_id, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, alice.user_id);
}

#[tokio::test]
async fn test_queries_tolerate_unknown_ids() {
    let store: Arc<MemoryAuditLogStore> = Arc::new(MemoryAuditLogStore::new());
    let service = ActivityQueryService::new(store);
    let env = TestEnv::new();
    let viewer = env.register("viewer", UserRole::Requester).await;

    assert!(service.status_history(&viewer, Uuid::new_v4()).await.is_empty());

    let (total, entries) = service
        .status_history_in_range(
            &viewer,
            Uuid::new_v4(),
            start_time(),
            start_time() + Duration::days(1),
            &PageRequest::default(),
        )
        .await;
    assert_eq!(total, 0);
    assert!(entries.is_empty());
}
