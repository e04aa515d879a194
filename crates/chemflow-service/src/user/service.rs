//! User service: credential verification, profile lookup, and account
//! listing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use chemflow_auth::jwt::JwtEncoder;
use chemflow_auth::password::PasswordHasher;
use chemflow_core::error::AppError;
use chemflow_core::traits::Clock;
use chemflow_core::types::pagination::{PageRequest, PageResponse};
use chemflow_database::store::UserStore;
use chemflow_entity::audit::{AuditAction, AuditEntityType};
use chemflow_entity::user::User;

use crate::audit::recorder::{AuditEvent, AuditRecorder};
use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed access token.
    pub token: String,
    /// Token expiration time.
    pub expires_at: chrono::DateTime<chrono::Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Handles login, logout, and user queries.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher for credential verification.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder for issuing access tokens.
    encoder: Arc<JwtEncoder>,
    /// Audit recorder.
    recorder: AuditRecorder,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        recorder: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            recorder,
            clock,
        }
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords answer identically so the
    /// response does not reveal which accounts exist.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<LoginOutcome, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let (token, expires_at) = self.encoder.generate_access_token(&user)?;
        self.users.record_login(user.id, self.clock.now()).await?;

        info!(user_id = %user.id, "User logged in");

        self.recorder
            .record(AuditEvent {
                action: AuditAction::Login,
                entity_type: AuditEntityType::User,
                entity_id: Some(user.id),
                user_id: Some(user.id),
                user_name: user.full_name.clone(),
                user_role: user.role,
                previous_value: None,
                new_value: None,
                details: "User logged in".to_string(),
                ip_address,
                user_agent,
            })
            .await;

        Ok(LoginOutcome {
            token,
            expires_at,
            user,
        })
    }

    /// Records a logout for the calling principal.
    ///
    /// Tokens stay valid until expiry; this exists for the audit trail.
    pub async fn logout(&self, ctx: &RequestContext) {
        info!(user_id = %ctx.user_id, "User logged out");

        self.recorder
            .record(AuditEvent {
                action: AuditAction::Logout,
                entity_type: AuditEntityType::User,
                entity_id: Some(ctx.user_id),
                user_id: Some(ctx.user_id),
                user_name: ctx.full_name.clone(),
                user_role: ctx.role,
                previous_value: None,
                new_value: None,
                details: "User logged out".to_string(),
                ip_address: ctx.ip_address.clone(),
                user_agent: ctx.user_agent.clone(),
            })
            .await;
    }

    /// Fetches the calling principal's own profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Fetches any user by ID. Admin only.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Not authorized to view other users"));
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists all users, paginated. Admin only.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Not authorized to list users"));
        }
        self.users.list(page).await
    }
}
