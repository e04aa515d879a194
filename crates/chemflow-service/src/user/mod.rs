//! User authentication and account services.

pub mod service;

pub use service::{LoginOutcome, UserService};
