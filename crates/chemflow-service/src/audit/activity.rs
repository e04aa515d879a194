//! Read-side audit queries with caller authorization.
//!
//! Authorization failures are real errors (`Forbidden`). Storage failures
//! are not: queries answer with an empty collection and a structured
//! warning, so a degraded audit store never takes down a caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use chemflow_core::error::AppError;
use chemflow_core::types::pagination::PageRequest;
use chemflow_database::store::AuditLogStore;
use chemflow_entity::audit::{AuditEntityType, AuditLogEntry};

use crate::context::RequestContext;

/// Serves audit history queries to the API layer.
#[derive(Debug, Clone)]
pub struct ActivityQueryService {
    /// Audit log store.
    store: Arc<dyn AuditLogStore>,
}

impl ActivityQueryService {
    /// Creates a new activity query service.
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Status-change timeline for a ticket, oldest first.
    ///
    /// Available to any authenticated principal.
    pub async fn status_history(
        &self,
        _ctx: &RequestContext,
        ticket_id: Uuid,
    ) -> Vec<AuditLogEntry> {
        self.store
            .find_status_history(ticket_id)
            .await
            .unwrap_or_else(|e| {
                warn!(ticket_id = %ticket_id, error = %e, "Failed to fetch status history");
                Vec::new()
            })
    }

    /// Paginated status-change timeline within a date range, with total count.
    pub async fn status_history_in_range(
        &self,
        _ctx: &RequestContext,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page: &PageRequest,
    ) -> (u64, Vec<AuditLogEntry>) {
        let total = self
            .store
            .count_status_history_in_range(ticket_id, start, end)
            .await
            .unwrap_or_else(|e| {
                warn!(ticket_id = %ticket_id, error = %e, "Failed to count status history");
                0
            });

        let entries = self
            .store
            .find_status_history_in_range(ticket_id, start, end, page)
            .await
            .unwrap_or_else(|e| {
                warn!(ticket_id = %ticket_id, error = %e, "Failed to fetch status history");
                Vec::new()
            });

        (total, entries)
    }

    /// Full audit trail for one entity, newest first. Admin only.
    pub async fn entity_logs(
        &self,
        ctx: &RequestContext,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> Result<Vec<AuditLogEntry>, AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden(
                "Not authorized to view complete audit logs",
            ));
        }

        Ok(self
            .store
            .find_by_entity(entity_type, entity_id, page)
            .await
            .unwrap_or_else(|e| {
                warn!(entity_id = %entity_id, error = %e, "Failed to fetch entity logs");
                Vec::new()
            }))
    }

    /// System-wide recent activity, newest first. Admin only.
    pub async fn recent_activity(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<Vec<AuditLogEntry>, AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden(
                "Not authorized to view system activity",
            ));
        }

        Ok(self.store.find_recent(page).await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch recent activity");
            Vec::new()
        }))
    }

    /// Activity performed by one user, newest first.
    ///
    /// Admins may query anyone; everyone else only themselves.
    pub async fn user_activity(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<Vec<AuditLogEntry>, AppError> {
        if !ctx.is_admin() && ctx.user_id != user_id {
            return Err(AppError::forbidden(
                "Not authorized to view other user activities",
            ));
        }

        Ok(self
            .store
            .find_by_user(user_id, page)
            .await
            .unwrap_or_else(|e| {
                warn!(user_id = %user_id, error = %e, "Failed to fetch user activity");
                Vec::new()
            }))
    }
}

#[cfg(test)]
mod tests {
    use chemflow_core::ErrorKind;
    use chemflow_database::memory::MemoryAuditLogStore;
    use chemflow_entity::user::{Department, UserRole};

    use super::*;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(
            Uuid::new_v4(),
            role,
            "Test User".to_string(),
            Department::Quality,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_recent_activity_requires_admin() {
        let service = ActivityQueryService::new(Arc::new(MemoryAuditLogStore::new()));

        let err = service
            .recent_activity(&ctx(UserRole::Approver), &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert!(
            service
                .recent_activity(&ctx(UserRole::Admin), &PageRequest::default())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_user_activity_self_or_admin() {
        let service = ActivityQueryService::new(Arc::new(MemoryAuditLogStore::new()));
        let requester = ctx(UserRole::Requester);

        // Own activity is fine.
        assert!(
            service
                .user_activity(&requester, requester.user_id, &PageRequest::default())
                .await
                .is_ok()
        );

        // Someone else's is not.
        let err = service
            .user_activity(&requester, Uuid::new_v4(), &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        // Unless you are an admin.
        assert!(
            service
                .user_activity(&ctx(UserRole::Admin), Uuid::new_v4(), &PageRequest::default())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_status_history_empty_for_unknown_ticket() {
        let service = ActivityQueryService::new(Arc::new(MemoryAuditLogStore::new()));
        let history = service
            .status_history(&ctx(UserRole::Requester), Uuid::new_v4())
            .await;
        assert!(history.is_empty());
    }
}
