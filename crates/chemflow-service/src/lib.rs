//! # chemflow-service
//!
//! Business logic service layer for ChemFlow. Each service orchestrates
//! stores, the workflow policy, and the audit recorder to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod context;
pub mod sanitize;
pub mod ticket;
pub mod user;

pub use audit::{ActivityQueryService, AuditEvent, AuditRecorder};
pub use context::RequestContext;
pub use ticket::TicketService;
pub use user::UserService;
