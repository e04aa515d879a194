//! Audit log repository implementation.
//!
//! The audit table is append-only: this repository exposes insert and
//! reads, nothing else. The `seq` column breaks timestamp ties in
//! insertion order so history reconstruction is deterministic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use chemflow_core::error::{AppError, ErrorKind};
use chemflow_core::result::AppResult;
use chemflow_core::types::pagination::PageRequest;
use chemflow_entity::audit::{AuditAction, AuditEntityType, AuditLogEntry};

use crate::store::AuditLogStore;

/// Repository for audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogStore for AuditLogRepository {
    async fn insert(&self, entry: &AuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log \
             (id, action, entity_type, entity_id, user_id, user_name, user_role, \
              previous_value, new_value, details, timestamp, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(entry.id)
        .bind(entry.action)
        .bind(entry.entity_type)
        .bind(entry.entity_id)
        .bind(entry.user_id)
        .bind(&entry.user_name)
        .bind(entry.user_role)
        .bind(&entry.previous_value)
        .bind(&entry.new_value)
        .bind(&entry.details)
        .bind(entry.timestamp)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e))
    }

    async fn find_by_entity(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log WHERE entity_type = $1 AND entity_id = $2 \
             ORDER BY timestamp DESC, seq DESC LIMIT $3 OFFSET $4",
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entity logs", e))
    }

    async fn find_status_history(&self, ticket_id: Uuid) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log WHERE entity_type = $1 AND entity_id = $2 AND action = $3 \
             ORDER BY timestamp ASC, seq ASC",
        )
        .bind(AuditEntityType::Ticket)
        .bind(ticket_id)
        .bind(AuditAction::StatusChange)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find status history", e)
        })
    }

    async fn count_status_history_in_range(
        &self,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM audit_log \
             WHERE entity_type = $1 AND entity_id = $2 AND action = $3 \
             AND timestamp >= $4 AND timestamp <= $5",
        )
        .bind(AuditEntityType::Ticket)
        .bind(ticket_id)
        .bind(AuditAction::StatusChange)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count status history", e)
        })?;
        Ok(count as u64)
    }

    async fn find_status_history_in_range(
        &self,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log \
             WHERE entity_type = $1 AND entity_id = $2 AND action = $3 \
             AND timestamp >= $4 AND timestamp <= $5 \
             ORDER BY timestamp ASC, seq ASC LIMIT $6 OFFSET $7",
        )
        .bind(AuditEntityType::Ticket)
        .bind(ticket_id)
        .bind(AuditAction::StatusChange)
        .bind(start)
        .bind(end)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find status history", e)
        })
    }

    async fn find_recent(&self, page: &PageRequest) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log ORDER BY timestamp DESC, seq DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find recent activity", e)
        })
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log WHERE user_id = $1 \
             ORDER BY timestamp DESC, seq DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user activity", e))
    }
}
