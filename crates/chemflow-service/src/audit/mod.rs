//! Audit recording and activity queries.

pub mod activity;
pub mod recorder;

pub use activity::ActivityQueryService;
pub use recorder::{AuditEvent, AuditRecorder};
