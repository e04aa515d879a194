//! Request body DTOs.

use serde::Deserialize;

/// POST /api/auth/login body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}
