//! # chemflow-entity
//!
//! Domain entity models for ChemFlow. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow` where the row shape matches.

pub mod audit;
pub mod ticket;
pub mod user;
