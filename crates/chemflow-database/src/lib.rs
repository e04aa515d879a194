//! # chemflow-database
//!
//! Persistence layer for ChemFlow: the PostgreSQL connection pool, the
//! migration runner, the [`store`] trait seams consumed by the service
//! layer, and their implementations: sqlx repositories for production
//! and in-memory stores for tests and ephemeral deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use store::{AuditLogStore, TicketQuery, TicketScope, TicketStore, UserStore};
