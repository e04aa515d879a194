//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use chemflow_auth::jwt::{JwtDecoder, JwtEncoder};
use chemflow_auth::password::PasswordHasher;
use chemflow_core::config::AppConfig;
use chemflow_core::traits::{Clock, SystemClock};
use chemflow_database::repositories::{AuditLogRepository, TicketRepository, UserRepository};
use chemflow_service::audit::{ActivityQueryService, AuditRecorder};
use chemflow_service::ticket::TicketService;
use chemflow_service::user::UserService;
use chemflow_storage::local::LocalUploadStore;
use chemflow_storage::provider::UploadStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Attachment upload store.
    pub uploads: Arc<dyn UploadStore>,
    /// Ticket service.
    pub ticket_service: Arc<TicketService>,
    /// User/auth service.
    pub user_service: Arc<UserService>,
    /// Audit activity queries.
    pub activity_service: Arc<ActivityQueryService>,
}

impl AppState {
    /// Wire up all repositories and services on top of a connected pool.
    pub async fn build(
        config: AppConfig,
        pool: PgPool,
    ) -> Result<Self, chemflow_core::error::AppError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let ticket_repo = Arc::new(TicketRepository::new(pool.clone()));
        let audit_repo = Arc::new(AuditLogRepository::new(pool.clone()));

        let recorder = AuditRecorder::new(audit_repo.clone(), clock.clone());
        let uploads = Arc::new(LocalUploadStore::new(&config.storage).await?);

        let ticket_service = Arc::new(TicketService::new(
            ticket_repo,
            user_repo.clone(),
            recorder.clone(),
            clock.clone(),
            config.tickets.clone(),
        ));

        let user_service = Arc::new(UserService::new(
            user_repo,
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config.auth)),
            recorder,
            clock,
        ));

        let activity_service = Arc::new(ActivityQueryService::new(audit_repo));

        Ok(Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            uploads,
            ticket_service,
            user_service,
            activity_service,
        })
    }
}
