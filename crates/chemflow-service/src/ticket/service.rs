//! Ticket service: orchestrates CRUD, workflow transitions, and audit
//! recording.
//!
//! Side-effect ordering is fixed: the ticket write commits first, then the
//! audit entry is recorded. A failed audit write never rolls back or fails
//! the business operation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use chemflow_auth::workflow::can_transition;
use chemflow_core::config::tickets::{DeletePolicy, TicketsConfig};
use chemflow_core::error::AppError;
use chemflow_core::traits::Clock;
use chemflow_core::types::pagination::{PageRequest, PageResponse};
use chemflow_database::store::{TicketQuery, TicketScope, TicketStore, UserStore};
use chemflow_entity::audit::{AuditAction, AuditEntityType};
use chemflow_entity::ticket::{Attachment, Ticket, TicketStatus};
use chemflow_entity::user::{User, UserRole};
use chemflow_storage::provider::StoredUpload;

use crate::audit::recorder::{AuditEvent, AuditRecorder};
use crate::context::RequestContext;

/// Request to create a new ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketRequest {
    /// Short summary of the request.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Raw chemical configuration JSON, parsed before any persistence.
    pub chemical_config: String,
    /// Uploads already written to storage, to attach to the new ticket.
    pub uploads: Vec<StoredUpload>,
}

/// Partial update for an existing ticket.
///
/// Creation-time fields (`requester_id`, `department`, `request_date`) are
/// deliberately absent; they cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New raw chemical configuration JSON.
    pub chemical_config: Option<String>,
    /// Target workflow status.
    pub status: Option<TicketStatus>,
    /// Uploads to append to the attachment list.
    pub uploads: Vec<StoredUpload>,
}

/// Date window and pagination for ticket listings.
#[derive(Debug, Clone, Default)]
pub struct TicketListFilter {
    /// Inclusive window start. Defaults to `end` minus the configured
    /// window.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive window end. Defaults to now.
    pub end: Option<DateTime<Utc>>,
    /// Pagination.
    pub page: PageRequest,
}

/// A page of tickets plus the date window that produced it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TicketListing {
    /// The matching tickets, newest first.
    pub tickets: PageResponse<Ticket>,
    /// Effective window start.
    pub start: DateTime<Utc>,
    /// Effective window end.
    pub end: DateTime<Utc>,
}

/// Manages ticket creation, listing, updates, and deletion.
#[derive(Debug, Clone)]
pub struct TicketService {
    /// Ticket store.
    tickets: Arc<dyn TicketStore>,
    /// User store, for resolving actor records.
    users: Arc<dyn UserStore>,
    /// Audit recorder.
    recorder: AuditRecorder,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Policy settings.
    config: TicketsConfig,
}

impl TicketService {
    /// Creates a new ticket service.
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        users: Arc<dyn UserStore>,
        recorder: AuditRecorder,
        clock: Arc<dyn Clock>,
        config: TicketsConfig,
    ) -> Self {
        Self {
            tickets,
            users,
            recorder,
            clock,
            config,
        }
    }

    /// Creates a ticket in `Draft` status owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateTicketRequest,
    ) -> Result<Ticket, AppError> {
        let requester = self.resolve_user(ctx.user_id).await?;
        let chemical_config = parse_chemical_config(&req.chemical_config)?;

        let now = self.clock.now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            chemical_config,
            attachments: self.stamp_uploads(req.uploads, ctx.user_id, now),
            status: TicketStatus::Draft,
            requester_id: requester.id,
            department: requester.department,
            request_date: now,
            created_at: now,
            updated_at: now,
        };

        let ticket = self.tickets.insert(&ticket).await?;

        info!(
            user_id = %ctx.user_id,
            ticket_id = %ticket.id,
            "Ticket created"
        );

        self.recorder
            .record(AuditEvent {
                action: AuditAction::Create,
                entity_type: AuditEntityType::Ticket,
                entity_id: Some(ticket.id),
                user_id: Some(ctx.user_id),
                user_name: requester.full_name.clone(),
                user_role: ctx.role,
                previous_value: None,
                new_value: serde_json::to_value(&ticket).ok(),
                details: "Ticket created".to_string(),
                ip_address: ctx.ip_address.clone(),
                user_agent: ctx.user_agent.clone(),
            })
            .await;

        Ok(ticket)
    }

    /// Fetches one ticket. No audit entry is emitted for reads.
    pub async fn get(&self, _ctx: &RequestContext, ticket_id: Uuid) -> Result<Ticket, AppError> {
        self.tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))
    }

    /// Lists tickets visible to the caller within a date window.
    ///
    /// Visibility is role-based: admins see everything, approvers see
    /// tickets in review stages plus their own, requesters only their own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: TicketListFilter,
    ) -> Result<TicketListing, AppError> {
        let end = filter.end.unwrap_or_else(|| self.clock.now());
        let start = filter
            .start
            .unwrap_or_else(|| end - Duration::days(self.config.default_window_days));

        let scope = match ctx.role {
            UserRole::Admin => TicketScope::All,
            UserRole::Approver => TicketScope::ReviewableOrOwn(ctx.user_id),
            UserRole::Requester => TicketScope::Own(ctx.user_id),
        };

        let tickets = self
            .tickets
            .list(&TicketQuery {
                scope,
                start,
                end,
                page: filter.page,
            })
            .await?;

        Ok(TicketListing {
            tickets,
            start,
            end,
        })
    }

    /// Applies a patch to a ticket, enforcing the update gate and the
    /// workflow transition policy.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        ticket_id: Uuid,
        patch: TicketPatch,
    ) -> Result<Ticket, AppError> {
        let ticket = self
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        let actor = self.resolve_user(ctx.user_id).await?;
        let is_owner = ticket.is_owned_by(ctx.user_id);

        // Update gate: admins always, owners always, approvers only when
        // the patch carries a status the workflow policy lets them set.
        let permitted = ctx.role == UserRole::Admin
            || is_owner
            || (ctx.role == UserRole::Approver
                && patch
                    .status
                    .is_some_and(|target| can_transition(ctx.role, is_owner, ticket.status, target)));

        if !permitted {
            return Err(AppError::forbidden("Not authorized to update this ticket"));
        }

        // Parse before any mutation so a malformed payload aborts cleanly.
        let new_config = patch
            .chemical_config
            .as_deref()
            .map(parse_chemical_config)
            .transpose()?;

        let previous = ticket.clone();
        let now = self.clock.now();
        let mut updated = ticket;

        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(config) = new_config {
            updated.chemical_config = config;
        }

        // Attachments are additive: new uploads are appended, never replace
        // or reorder existing entries.
        updated
            .attachments
            .extend(self.stamp_uploads(patch.uploads, ctx.user_id, now));

        // A status equal to the current value is not a transition; it falls
        // through to the general update below.
        let status_changed = patch.status.filter(|s| *s != updated.status);
        if let Some(target) = status_changed {
            updated.status = target;
        }
        updated.updated_at = now;

        let updated = self.tickets.update(&updated).await?;

        if let Some(target) = status_changed {
            info!(
                user_id = %ctx.user_id,
                ticket_id = %updated.id,
                from = %previous.status,
                to = %target,
                "Ticket status changed"
            );

            self.recorder
                .record(self.ticket_event(
                    ctx,
                    &actor,
                    updated.id,
                    AuditAction::StatusChange,
                    Some(serde_json::json!({ "status": previous.status })),
                    Some(serde_json::json!({ "status": target })),
                    format!("Status changed from {} to {}", previous.status, target),
                ))
                .await;

            // Supplementary entries alongside the STATUS_CHANGE, not
            // instead of it.
            match target {
                TicketStatus::Approved => {
                    self.recorder
                        .record(self.ticket_event(
                            ctx,
                            &actor,
                            updated.id,
                            AuditAction::Approve,
                            None,
                            None,
                            "Ticket approved".to_string(),
                        ))
                        .await;
                }
                TicketStatus::Rejected => {
                    self.recorder
                        .record(self.ticket_event(
                            ctx,
                            &actor,
                            updated.id,
                            AuditAction::Reject,
                            None,
                            None,
                            "Ticket rejected".to_string(),
                        ))
                        .await;
                }
                _ => {}
            }
        } else {
            info!(
                user_id = %ctx.user_id,
                ticket_id = %updated.id,
                "Ticket updated"
            );

            self.recorder
                .record(self.ticket_event(
                    ctx,
                    &actor,
                    updated.id,
                    AuditAction::Update,
                    serde_json::to_value(&previous).ok(),
                    serde_json::to_value(&updated).ok(),
                    "Ticket updated".to_string(),
                ))
                .await;
        }

        Ok(updated)
    }

    /// Deletes a ticket, retaining its audit history.
    pub async fn delete(&self, ctx: &RequestContext, ticket_id: Uuid) -> Result<(), AppError> {
        let ticket = self
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        if self.config.delete_policy == DeletePolicy::OwnerOrAdmin
            && !ctx.is_admin()
            && !ticket.is_owned_by(ctx.user_id)
        {
            return Err(AppError::forbidden("Not authorized to delete this ticket"));
        }

        let actor = self.resolve_user(ctx.user_id).await?;
        let snapshot = serde_json::to_value(&ticket).ok();

        self.tickets.delete(ticket_id).await?;

        info!(
            user_id = %ctx.user_id,
            ticket_id = %ticket_id,
            "Ticket deleted"
        );

        self.recorder
            .record(self.ticket_event(
                ctx,
                &actor,
                ticket_id,
                AuditAction::Delete,
                snapshot,
                None,
                "Ticket deleted".to_string(),
            ))
            .await;

        Ok(())
    }

    /// Resolve the full user record behind a principal.
    async fn resolve_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Convert stored uploads into stamped attachments.
    fn stamp_uploads(
        &self,
        uploads: Vec<StoredUpload>,
        uploaded_by: Uuid,
        at: DateTime<Utc>,
    ) -> Vec<Attachment> {
        uploads
            .into_iter()
            .map(|u| Attachment {
                id: u.filename,
                name: u.original_name,
                url: u.url,
                mime_type: u.mime_type,
                size_bytes: u.size_bytes,
                uploaded_by,
                uploaded_at: at,
            })
            .collect()
    }

    /// Assemble a ticket-targeted audit event.
    #[allow(clippy::too_many_arguments)]
    fn ticket_event(
        &self,
        ctx: &RequestContext,
        actor: &User,
        ticket_id: Uuid,
        action: AuditAction,
        previous_value: Option<serde_json::Value>,
        new_value: Option<serde_json::Value>,
        details: String,
    ) -> AuditEvent {
        AuditEvent {
            action,
            entity_type: AuditEntityType::Ticket,
            entity_id: Some(ticket_id),
            user_id: Some(ctx.user_id),
            user_name: actor.full_name.clone(),
            user_role: ctx.role,
            previous_value,
            new_value,
            details,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
        }
    }
}

/// Parse the raw chemical configuration payload.
///
/// A malformed payload is a client error and must abort the whole
/// operation before any mutation.
fn parse_chemical_config(raw: &str) -> Result<serde_json::Value, AppError> {
    serde_json::from_str(raw)
        .map_err(|_| AppError::validation("Invalid chemical configuration format"))
}
