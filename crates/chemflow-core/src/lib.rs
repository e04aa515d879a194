//! # chemflow-core
//!
//! Core building blocks shared by every ChemFlow crate: the unified
//! [`AppError`] type, the [`AppResult`] alias, configuration schemas,
//! shared value types (IDs, pagination), and the trait seams that the
//! outer crates implement (clock).

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
