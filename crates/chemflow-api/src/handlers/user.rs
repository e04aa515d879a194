//! User account handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::response::UserProfile;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.profile(&auth.0).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": UserProfile::from(&user) }),
    ))
}

/// GET /api/users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users = state
        .user_service
        .list_users(&auth.0, &pagination.into_page_request())
        .await?;

    let profiles = users.map(|u| UserProfile::from(&u));
    Ok(Json(serde_json::json!({ "success": true, "data": profiles })))
}
