//! Route definitions.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/api/health", get(handlers::health::health))
        // Auth
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // Tickets
        .route(
            "/api/tickets",
            get(handlers::ticket::list_tickets).post(handlers::ticket::create_ticket),
        )
        .route(
            "/api/tickets/{id}",
            put(handlers::ticket::update_ticket)
                .get(handlers::ticket::get_ticket)
                .delete(handlers::ticket::delete_ticket),
        )
        // Audit
        .route(
            "/api/audit/tickets/{id}/status-history",
            get(handlers::audit::ticket_status_history),
        )
        .route(
            "/api/audit/tickets/{id}/logs",
            get(handlers::audit::ticket_logs),
        )
        .route("/api/audit/recent", get(handlers::audit::recent_activity))
        .route("/api/audit/users/{id}", get(handlers::audit::user_activity))
        // Users
        .route("/api/users", get(handlers::user::list_users))
        .route("/api/users/me", get(handlers::user::me))
}
