//! Ticket repository implementation.
//!
//! The persisted row shape differs from the domain [`Ticket`] in that
//! attachments and the chemical configuration live in JSONB columns, so
//! this module maps between [`TicketRow`] and the domain type at the
//! boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use chemflow_core::error::{AppError, ErrorKind};
use chemflow_core::result::AppResult;
use chemflow_core::types::pagination::PageResponse;
use chemflow_entity::ticket::{Attachment, Ticket, TicketStatus};
use chemflow_entity::user::Department;

use crate::store::{TicketQuery, TicketScope, TicketStore};

/// Persisted row shape for a ticket.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    title: String,
    description: String,
    chemical_config: serde_json::Value,
    attachments: Json<Vec<Attachment>>,
    status: TicketStatus,
    requester_id: Uuid,
    department: Department,
    request_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            chemical_config: row.chemical_config,
            attachments: row.attachments.0,
            status: row.status,
            requester_id: row.requester_id,
            department: row.department,
            request_date: row.request_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for tickets.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Reviewable statuses visible to approvers on other people's tickets.
fn reviewable() -> Vec<TicketStatus> {
    vec![
        TicketStatus::Pending,
        TicketStatus::Approved,
        TicketStatus::Rejected,
    ]
}

#[async_trait]
impl TicketStore for TicketRepository {
    async fn insert(&self, ticket: &Ticket) -> AppResult<Ticket> {
        sqlx::query_as::<_, TicketRow>(
            "INSERT INTO tickets \
             (id, title, description, chemical_config, attachments, status, requester_id, department, request_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(ticket.id)
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(&ticket.chemical_config)
        .bind(Json(&ticket.attachments))
        .bind(ticket.status)
        .bind(ticket.requester_id)
        .bind(ticket.department)
        .bind(ticket.request_date)
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .fetch_one(&self.pool)
        .await
        .map(Ticket::from)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create ticket", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, TicketRow>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Ticket::from))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))
    }

    async fn list(&self, query: &TicketQuery) -> AppResult<PageResponse<Ticket>> {
        let mut conditions = vec![
            "request_date >= $1".to_string(),
            "request_date <= $2".to_string(),
        ];
        let mut param_idx = 3u32;

        match query.scope {
            TicketScope::All => {}
            TicketScope::Own(_) => {
                conditions.push(format!("requester_id = ${param_idx}"));
                param_idx += 1;
            }
            TicketScope::ReviewableOrOwn(_) => {
                conditions.push(format!(
                    "(status = ANY(${}) OR requester_id = ${param_idx})",
                    param_idx + 1
                ));
                param_idx += 2;
            }
        }

        let where_clause = conditions.join(" AND ");
        let count_sql = format!("SELECT COUNT(*) FROM tickets WHERE {where_clause}");
        let select_sql = format!(
            "SELECT * FROM tickets WHERE {where_clause} \
             ORDER BY request_date DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(query.start)
            .bind(query.end);
        let mut select_query = sqlx::query_as::<_, TicketRow>(&select_sql)
            .bind(query.start)
            .bind(query.end);

        match query.scope {
            TicketScope::All => {}
            TicketScope::Own(id) => {
                count_query = count_query.bind(id);
                select_query = select_query.bind(id);
            }
            TicketScope::ReviewableOrOwn(id) => {
                count_query = count_query.bind(id).bind(reviewable());
                select_query = select_query.bind(id).bind(reviewable());
            }
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count tickets", e)
        })?;

        let rows = select_query
            .bind(query.page.limit() as i64)
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list tickets", e)
            })?;

        Ok(PageResponse::new(
            rows.into_iter().map(Ticket::from).collect(),
            query.page.page,
            query.page.page_size,
            total as u64,
        ))
    }

    async fn update(&self, ticket: &Ticket) -> AppResult<Ticket> {
        // requester_id, department, and request_date are immutable and
        // deliberately absent from the SET list.
        sqlx::query_as::<_, TicketRow>(
            "UPDATE tickets SET title = $2, description = $3, chemical_config = $4, \
             attachments = $5, status = $6, updated_at = $7 WHERE id = $1 RETURNING *",
        )
        .bind(ticket.id)
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(&ticket.chemical_config)
        .bind(Json(&ticket.attachments))
        .bind(ticket.status)
        .bind(ticket.updated_at)
        .fetch_one(&self.pool)
        .await
        .map(Ticket::from)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update ticket", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete ticket", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
