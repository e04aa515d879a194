//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use chemflow_core::config::tickets::TicketsConfig;
use chemflow_core::traits::FixedClock;
use chemflow_database::memory::{MemoryAuditLogStore, MemoryTicketStore, MemoryUserStore};
use chemflow_database::store::UserStore;
use chemflow_entity::user::{Department, User, UserRole};
use chemflow_service::audit::{ActivityQueryService, AuditRecorder};
use chemflow_service::context::RequestContext;
use chemflow_service::ticket::{CreateTicketRequest, TicketPatch, TicketService};

/// Service stack wired on in-memory stores with a stepping clock.
pub struct TestEnv {
    /// Ticket service under test.
    pub tickets: TicketService,
    /// Audit query service under test.
    pub activity: ActivityQueryService,
    /// Direct handle on the audit store for assertions.
    pub audit_store: Arc<MemoryAuditLogStore>,
    /// Direct handle on the user store.
    pub users: Arc<MemoryUserStore>,
    /// The clock driving every timestamp.
    pub clock: Arc<FixedClock>,
}

/// Deterministic start instant for every test run.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

impl TestEnv {
    /// Build a fresh environment.
    pub fn new() -> Self {
        let audit_store = Arc::new(MemoryAuditLogStore::new());
        let users = Arc::new(MemoryUserStore::new());
        let clock = Arc::new(FixedClock::stepping(start_time(), Duration::seconds(1)));
        let recorder = AuditRecorder::new(audit_store.clone(), clock.clone());

        let tickets = TicketService::new(
            Arc::new(MemoryTicketStore::new()),
            users.clone(),
            recorder,
            clock.clone(),
            TicketsConfig::default(),
        );

        let activity = ActivityQueryService::new(audit_store.clone());

        Self {
            tickets,
            activity,
            audit_store,
            users,
            clock,
        }
    }

    /// Register a user and return a request context acting as them.
    pub async fn register(&self, username: &str, role: UserRole) -> RequestContext {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: String::new(),
            full_name: format!("{username} (full name)"),
            role,
            department: Department::Production,
            created_at: start_time(),
            last_login_at: None,
        };
        self.users.insert(&user).await.expect("user insert");

        RequestContext::new(
            user.id,
            role,
            user.full_name.clone(),
            user.department,
            Some("203.0.113.7".to_string()),
            Some("integration-tests".to_string()),
        )
    }
}

/// Minimal valid create request.
pub fn draft_request(title: &str) -> CreateTicketRequest {
    CreateTicketRequest {
        title: title.to_string(),
        description: "integration test ticket".to_string(),
        chemical_config: r#"{"machineId":"M-42","chemicalType":"solvent","concentration":1.5}"#
            .to_string(),
        uploads: Vec::new(),
    }
}

/// Patch that only moves status.
pub fn to_status(status: chemflow_entity::ticket::TicketStatus) -> TicketPatch {
    TicketPatch {
        status: Some(status),
        ..TicketPatch::default()
    }
}
