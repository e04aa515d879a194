//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use chemflow_core::config::auth::AuthConfig;
use chemflow_core::error::AppError;

use super::claims::Claims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks signature validity and expiration; returns an Unauthorized
    /// error for anything that does not verify.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use chemflow_core::config::auth::AuthConfig;
    use chemflow_entity::user::{Department, User, UserRole};
    use chrono::Utc;
    use uuid::Uuid;

    use super::super::encoder::JwtEncoder;
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_access_ttl_hours: 24,
            password_min_length: 8,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "operator1".to_string(),
            password_hash: String::new(),
            full_name: "Test Operator".to_string(),
            role: UserRole::Requester,
            department: Department::Production,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user = test_user();

        let (token, _exp) = encoder.generate_access_token(&user).unwrap();
        let claims = decoder.decode_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Requester);
        assert_eq!(claims.department, Department::Production);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let encoder = JwtEncoder::new(&test_config());
        let decoder = JwtDecoder::new(&AuthConfig {
            jwt_secret: "other-secret".to_string(),
            jwt_access_ttl_hours: 24,
            password_min_length: 8,
        });

        let (token, _) = encoder.generate_access_token(&test_user()).unwrap();
        assert!(decoder.decode_access_token(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let decoder = JwtDecoder::new(&test_config());
        assert!(decoder.decode_access_token("not-a-token").is_err());
    }
}
