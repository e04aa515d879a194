//! Store trait seams consumed by the service layer.
//!
//! Each trait has two implementations: a sqlx repository in
//! [`crate::repositories`] and an in-memory store in [`crate::memory`].
//! Services hold `Arc<dyn ...Store>` so that tests can swap in the
//! in-memory variant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use chemflow_core::result::AppResult;
use chemflow_core::types::pagination::{PageRequest, PageResponse};
use chemflow_entity::audit::{AuditEntityType, AuditLogEntry};
use chemflow_entity::ticket::Ticket;
use chemflow_entity::user::User;

/// Which tickets a listing may see, derived from the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// Every ticket (admins).
    All,
    /// Only tickets owned by this user (requesters).
    Own(Uuid),
    /// Tickets in review stages plus this user's own (approvers):
    /// status in {Pending, Approved, Rejected} OR owned by the user.
    ReviewableOrOwn(Uuid),
}

/// A scoped, date-windowed, paginated ticket listing query.
#[derive(Debug, Clone)]
pub struct TicketQuery {
    /// Role-derived visibility scope.
    pub scope: TicketScope,
    /// Inclusive start of the request-date window.
    pub start: DateTime<Utc>,
    /// Inclusive end of the request-date window.
    pub end: DateTime<Utc>,
    /// Pagination.
    pub page: PageRequest,
}

/// Persistence operations for users.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new user.
    async fn insert(&self, user: &User) -> AppResult<User>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by login name.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Record a successful login time.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// List all users, paginated, ordered by username.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;
}

/// Persistence operations for tickets.
#[async_trait]
pub trait TicketStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new ticket.
    async fn insert(&self, ticket: &Ticket) -> AppResult<Ticket>;

    /// Find a ticket by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>>;

    /// List tickets matching the scope and date window, newest first.
    async fn list(&self, query: &TicketQuery) -> AppResult<PageResponse<Ticket>>;

    /// Persist the mutable fields of an existing ticket.
    ///
    /// `requester_id`, `department`, and `request_date` are never written;
    /// the implementation must not include them in the update.
    async fn update(&self, ticket: &Ticket) -> AppResult<Ticket>;

    /// Delete a ticket by ID. Returns `true` if a row was removed.
    ///
    /// Audit entries referencing the ticket are not touched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence operations for the append-only audit log.
///
/// There is deliberately no update or delete: entries are write-once.
#[async_trait]
pub trait AuditLogStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new audit entry.
    async fn insert(&self, entry: &AuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Entries for one entity, newest first.
    async fn find_by_entity(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>>;

    /// STATUS_CHANGE entries for a ticket, oldest first (timeline order).
    async fn find_status_history(&self, ticket_id: Uuid) -> AppResult<Vec<AuditLogEntry>>;

    /// Count STATUS_CHANGE entries for a ticket within a time range.
    async fn count_status_history_in_range(
        &self,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// STATUS_CHANGE entries within a time range, oldest first, paginated.
    async fn find_status_history_in_range(
        &self,
        ticket_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page: &PageRequest,
    ) -> AppResult<Vec<AuditLogEntry>>;

    /// All entries, newest first.
    async fn find_recent(&self, page: &PageRequest) -> AppResult<Vec<AuditLogEntry>>;

    /// Entries recorded by one actor, newest first.
    async fn find_by_user(&self, user_id: Uuid, page: &PageRequest)
    -> AppResult<Vec<AuditLogEntry>>;
}
