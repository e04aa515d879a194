//! Ticket CRUD handlers.
//!
//! Create and update accept multipart form data: text fields for the
//! ticket payload plus any number of `files` parts, which are written to
//! the upload store before the service runs.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use uuid::Uuid;

use chemflow_core::error::AppError;
use chemflow_entity::ticket::TicketStatus;
use chemflow_storage::provider::StoredUpload;

use crate::error::ApiError;
use crate::extractors::{AuthUser, DateRangeParams, PaginationParams};
use crate::state::AppState;

/// Text fields plus stored uploads decoded from one multipart request.
#[derive(Debug, Default)]
struct TicketForm {
    title: Option<String>,
    description: Option<String>,
    chemical_config: Option<String>,
    status: Option<TicketStatus>,
    uploads: Vec<StoredUpload>,
}

/// Drain a multipart stream, storing file parts as they arrive.
async fn read_ticket_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<TicketForm, AppError> {
    let mut form = TicketForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => form.title = Some(read_text(field).await?),
            Some("description") => form.description = Some(read_text(field).await?),
            Some("chemicalConfig") => form.chemical_config = Some(read_text(field).await?),
            Some("status") => {
                form.status = Some(read_text(field).await?.parse::<TicketStatus>()?);
            }
            Some("files") => {
                let original_name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read upload '{original_name}': {e}"))
                })?;
                form.uploads
                    .push(state.uploads.store(&original_name, &mime_type, data).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart field: {e}")))
}

/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let form = read_ticket_form(&state, multipart).await?;

    let req = chemflow_service::ticket::CreateTicketRequest {
        title: form
            .title
            .ok_or_else(|| AppError::validation("Missing title"))?,
        description: form
            .description
            .ok_or_else(|| AppError::validation("Missing description"))?,
        chemical_config: form
            .chemical_config
            .ok_or_else(|| AppError::validation("Missing chemicalConfig"))?,
        uploads: form.uploads,
    };

    let ticket = state.ticket_service.create(&auth.0, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": ticket })))
}

/// GET /api/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let listing = state
        .ticket_service
        .list(
            &auth.0,
            chemflow_service::ticket::TicketListFilter {
                start: range.start_date,
                end: range.end_date,
                page: pagination.into_page_request(),
            },
        )
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "tickets": listing.tickets,
            "dateRange": { "startDate": listing.start, "endDate": listing.end },
        },
    })))
}

/// GET /api/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ticket = state.ticket_service.get(&auth.0, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": ticket })))
}

/// PUT /api/tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let form = read_ticket_form(&state, multipart).await?;

    let patch = chemflow_service::ticket::TicketPatch {
        title: form.title,
        description: form.description,
        chemical_config: form.chemical_config,
        status: form.status,
        uploads: form.uploads,
    };

    let ticket = state.ticket_service.update(&auth.0, id, patch).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": ticket })))
}

/// DELETE /api/tickets/{id}
pub async fn delete_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.ticket_service.delete(&auth.0, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Ticket deleted" } }),
    ))
}
