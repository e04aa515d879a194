//! In-memory store implementations using Tokio mutexes.
//!
//! Suitable for tests and ephemeral single-node deployments. Semantics
//! mirror the sqlx repositories, including stable timestamp ordering with
//! insertion-order tie-breaking for audit entries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use chemflow_core::error::AppError;
use chemflow_core::result::AppResult;
use chemflow_core::types::pagination::{PageRequest, PageResponse};
use chemflow_entity::audit::{AuditAction, AuditEntityType, AuditLogEntry};
use chemflow_entity::ticket::{Ticket, TicketStatus};
use chemflow_entity::user::User;

use crate::store::{AuditLogStore, TicketQuery, TicketScope, TicketStore, UserStore};

/// In-memory user store.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let users = self.users.lock().await;
        let mut sorted: Vec<User> = users.clone();
        sorted.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(sorted, page))
    }
}

/// In-memory ticket store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTicketStore {
    tickets: Arc<Mutex<Vec<Ticket>>>,
}

impl MemoryTicketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn insert(&self, ticket: &Ticket) -> AppResult<Ticket> {
        let mut tickets = self.tickets.lock().await;
        tickets.push(ticket.clone());
        Ok(ticket.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>> {
        let tickets = self.tickets.lock().await;
        Ok(tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, query: &TicketQuery) -> AppResult<PageResponse<Ticket>> {
        let tickets = self.tickets.lock().await;
        let mut matching: Vec<Ticket> = tickets
            .iter()
            .filter(|t| t.request_date >= query.start && t.request_date <= query.end)
            .filter(|t| match query.scope {
                TicketScope::All => true,
                TicketScope::Own(user_id) => t.requester_id == user_id,
                TicketScope::ReviewableOrOwn(user_id) => {
                    t.status != TicketStatus::Draft || t.requester_id == user_id
                }
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        Ok(paginate(matching, &query.page))
    }

    async fn update(&self, ticket: &Ticket) -> AppResult<Ticket> {
        let mut tickets = self.tickets.lock().await;
        let existing = tickets
            .iter_mut()
            .find(|t| t.id == ticket.id)
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        // Immutable creation-time fields are preserved from the stored row,
        // matching the repository's UPDATE column list.
        existing.title = ticket.title.clone();
        existing.description = ticket.description.clone();
        existing.chemical_config = ticket.chemical_config.clone();
        existing.attachments = ticket.attachments.clone();
        existing.status = ticket.status;
        existing.updated_at = ticket.updated_at;

        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tickets = self.tickets.lock().await;
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        Ok(tickets.len() < before)
    }
}

/// In-memory audit log store.
///
/// Entries are kept in insertion order; sorts are stable, so equal
/// timestamps come back in the order they were recorded.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLogStore {
    entries: Arc<Mutex<Vec<AuditLogEntry>>>,
}

impl MemoryAuditLogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every entry in insertion order (test helper).
    pub async fn all(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AuditLogStore for MemoryAuditLogStore {
    async fn insert(&self, entry: &AuditLogEntry) -> AppResult<AuditLogEntry> {
        let mut entries = self.entries.lock().await;
        entries.push(entry.clone());
        Ok(entry.clone())
    }

    async fn find_by_entity(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|e| e.entity_type == entity_type && e.entity_id == entity_id)
            .cloned()
            .collect();
        matching.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        Ok(page_slice(matching, page))
    }

    async fn find_status_history(&self, ticket_id: Uuid) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|e| {
                e.entity_type == AuditEntityType::Ticket
                    && e.entity_id == ticket_id
                    && e.action == AuditAction::StatusChange
            })
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.timestamp);
        Ok(matching)
    }

    async fn count_status_history_in_range(
        &self,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<u64> {
        let entries = self.entries.lock().await;
        let count = entries
            .iter()
            .filter(|e| {
                e.entity_type == AuditEntityType::Ticket
                    && e.entity_id == ticket_id
                    && e.action == AuditAction::StatusChange
                    && e.timestamp >= start
                    && e.timestamp <= end
            })
            .count();
        Ok(count as u64)
    }

    async fn find_status_history_in_range(
        &self,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|e| {
                e.entity_type == AuditEntityType::Ticket
                    && e.entity_id == ticket_id
                    && e.action == AuditAction::StatusChange
                    && e.timestamp >= start
                    && e.timestamp <= end
            })
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.timestamp);
        Ok(page_slice(matching, page))
    }

    async fn find_recent(&self, page: &PageRequest) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        let mut all: Vec<AuditLogEntry> = entries.clone();
        all.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        Ok(page_slice(all, page))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        let mut matching: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        Ok(page_slice(matching, page))
    }
}

/// Apply pagination to a fully sorted vector, producing page metadata.
fn paginate<T: serde::Serialize + Clone>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let sliced = page_slice(items, page);
    PageResponse::new(sliced, page.page, page.page_size, total)
}

/// Slice a sorted vector to one page.
fn page_slice<T: Clone>(items: Vec<T>, page: &PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}
