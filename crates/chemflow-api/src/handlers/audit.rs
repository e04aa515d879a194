//! Audit history handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Duration;
use uuid::Uuid;

use chemflow_entity::audit::AuditEntityType;

use crate::dto::response::StatusHistoryItem;
use crate::error::ApiError;
use crate::extractors::{AuthUser, DateRangeParams, PaginationParams};
use crate::state::AppState;

/// GET /api/audit/tickets/{id}/status-history
///
/// Paginated status timeline within a date window, defaulting to the last
/// 30 days. Accessible to any authenticated principal.
pub async fn ticket_status_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let end = range.end_date.unwrap_or_else(chrono::Utc::now);
    let start = range.start_date.unwrap_or(end - Duration::days(30));
    let page = pagination.into_page_request();

    let (total, entries) = state
        .activity_service
        .status_history_in_range(&auth.0, ticket_id, start, end, &page)
        .await;

    let items: Vec<StatusHistoryItem> = entries.iter().map(StatusHistoryItem::from).collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "statusHistory": items,
            "pagination": {
                "total": total,
                "page": page.page,
                "limit": page.page_size,
            },
            "dateRange": { "startDate": start, "endDate": end },
        },
    })))
}

/// GET /api/audit/tickets/{id}/logs (full trail, admin only)
pub async fn ticket_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let logs = state
        .activity_service
        .entity_logs(
            &auth.0,
            AuditEntityType::Ticket,
            ticket_id,
            &pagination.into_page_request(),
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": logs })))
}

/// GET /api/audit/recent (system-wide activity, admin only)
pub async fn recent_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let logs = state
        .activity_service
        .recent_activity(&auth.0, &pagination.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": logs })))
}

/// GET /api/audit/users/{id} (one user's activity, admin or self)
pub async fn user_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let logs = state
        .activity_service
        .user_activity(&auth.0, user_id, &pagination.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": logs })))
}
