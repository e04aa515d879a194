//! Authentication handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, UserProfile};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let outcome = state
        .user_service
        .login(&req.username, &req.password, ip_address, user_agent)
        .await?;

    let body = LoginResponse {
        token: outcome.token,
        expires_at: outcome.expires_at,
        user: UserProfile::from(&outcome.user),
    };

    Ok(Json(serde_json::json!({ "success": true, "data": body })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.user_service.logout(&auth.0).await;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Logged out" } }),
    ))
}
