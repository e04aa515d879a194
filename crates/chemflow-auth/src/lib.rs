//! # chemflow-auth
//!
//! Authentication and authorization primitives: JWT encoding/decoding,
//! Argon2 password hashing, and the ticket workflow transition policy.

pub mod jwt;
pub mod password;
pub mod workflow;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
