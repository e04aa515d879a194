//! Audit recorder. Builds and persists immutable audit entries.
//!
//! Recording is best-effort by contract: a failed audit write is an
//! observability problem, never a business one. `record` therefore returns
//! `Option` and swallows every failure after logging it. The triggering
//! operation has already committed by the time an entry is recorded.

use std::sync::Arc;

use tracing::{error, warn};
use uuid::Uuid;

use chemflow_core::traits::Clock;
use chemflow_database::store::AuditLogStore;
use chemflow_entity::audit::{AuditAction, AuditEntityType, AuditLogEntry};
use chemflow_entity::user::UserRole;

use crate::sanitize::sanitize_snapshot;

/// One auditable event, as assembled by a business operation.
///
/// `entity_id` and `user_id` are optional at this boundary: callers in
/// degraded states may not have them, and the recorder answers with a
/// warning and `None` rather than failing the operation that triggered it.
/// Timestamps are server-assigned; there is deliberately no field for one.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// The action performed.
    pub action: AuditAction,
    /// The type of entity targeted.
    pub entity_type: AuditEntityType,
    /// The targeted entity's ID.
    pub entity_id: Option<Uuid>,
    /// The acting user's ID.
    pub user_id: Option<Uuid>,
    /// Actor's full name.
    pub user_name: String,
    /// Actor's role.
    pub user_role: UserRole,
    /// Snapshot before the action.
    pub previous_value: Option<serde_json::Value>,
    /// Snapshot after the action.
    pub new_value: Option<serde_json::Value>,
    /// Human-readable description.
    pub details: String,
    /// Actor's IP address.
    pub ip_address: Option<String>,
    /// Actor's User-Agent.
    pub user_agent: Option<String>,
}

/// Records audit entries and never raises to the caller.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    /// Audit log store.
    store: Arc<dyn AuditLogStore>,
    /// Time source for server-side timestamps.
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    /// Creates a new audit recorder.
    pub fn new(store: Arc<dyn AuditLogStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record one audit event.
    ///
    /// Returns the persisted entry, or `None` when the event is missing a
    /// required field or the write fails. Snapshots are sanitized here;
    /// callers cannot skip it.
    pub async fn record(&self, event: AuditEvent) -> Option<AuditLogEntry> {
        let Some(entity_id) = event.entity_id else {
            warn!(action = %event.action, "Missing entity_id for audit logging");
            return None;
        };
        let Some(user_id) = event.user_id else {
            warn!(action = %event.action, "Missing user_id for audit logging");
            return None;
        };

        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            action: event.action,
            entity_type: event.entity_type,
            entity_id,
            user_id,
            user_name: event.user_name,
            user_role: event.user_role,
            previous_value: event.previous_value.map(sanitize_snapshot),
            new_value: event.new_value.map(sanitize_snapshot),
            details: event.details,
            timestamp: self.clock.now(),
            ip_address: event.ip_address,
            user_agent: event.user_agent,
        };

        match self.store.insert(&entry).await {
            Ok(persisted) => Some(persisted),
            Err(e) => {
                error!(
                    action = %entry.action,
                    entity_id = %entry.entity_id,
                    error = %e,
                    "Failed to persist audit entry"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chemflow_core::traits::{FixedClock, SystemClock};
    use chemflow_database::memory::MemoryAuditLogStore;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn event(entity_id: Option<Uuid>, user_id: Option<Uuid>) -> AuditEvent {
        AuditEvent {
            action: AuditAction::Create,
            entity_type: AuditEntityType::Ticket,
            entity_id,
            user_id,
            user_name: "Test User".to_string(),
            user_role: UserRole::Requester,
            previous_value: None,
            new_value: None,
            details: "Ticket created".to_string(),
            ip_address: None,
            user_agent: None,
        }
    }

    #[tokio::test]
    async fn test_missing_user_id_returns_none_without_raising() {
        let store = Arc::new(MemoryAuditLogStore::new());
        let recorder = AuditRecorder::new(store.clone(), Arc::new(SystemClock));

        let result = recorder.record(event(Some(Uuid::new_v4()), None)).await;
        assert!(result.is_none());
        assert!(store.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_entity_id_returns_none() {
        let store = Arc::new(MemoryAuditLogStore::new());
        let recorder = AuditRecorder::new(store.clone(), Arc::new(SystemClock));

        let result = recorder.record(event(None, Some(Uuid::new_v4()))).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_timestamp_is_server_assigned() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::pinned(start));
        let recorder = AuditRecorder::new(Arc::new(MemoryAuditLogStore::new()), clock);

        let entry = recorder
            .record(event(Some(Uuid::new_v4()), Some(Uuid::new_v4())))
            .await
            .expect("entry should persist");
        assert_eq!(entry.timestamp, start);
    }

    #[tokio::test]
    async fn test_snapshots_are_sanitized() {
        let recorder = AuditRecorder::new(
            Arc::new(MemoryAuditLogStore::new()),
            Arc::new(SystemClock),
        );

        let mut ev = event(Some(Uuid::new_v4()), Some(Uuid::new_v4()));
        ev.new_value = Some(json!({"password": "x", "title": "y"}));
        let entry = recorder.record(ev).await.expect("entry should persist");

        let new_value = entry.new_value.expect("snapshot present");
        assert_eq!(new_value["password"], crate::sanitize::REDACTED);
        assert_eq!(new_value["title"], "y");
    }

    #[tokio::test]
    async fn test_consecutive_entries_keep_clock_order() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::stepping(start, Duration::seconds(1)));
        let store = Arc::new(MemoryAuditLogStore::new());
        let recorder = AuditRecorder::new(store.clone(), clock);

        let first = recorder
            .record(event(Some(Uuid::new_v4()), Some(Uuid::new_v4())))
            .await
            .unwrap();
        let second = recorder
            .record(event(Some(Uuid::new_v4()), Some(Uuid::new_v4())))
            .await
            .unwrap();
        assert!(second.timestamp > first.timestamp);
    }
}
