//! Login credential check and token issuance
//!
//! The login scheme is deliberately simple: one configured secret, exact
//! string comparison, no lockout or attempt counting. When a JWT secret is
//! configured the issued token is a signed HS256 JWT with an expiry;
//! otherwise it is a time-derived opaque string with no guarantees.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::Args;
use crate::error::ApiError;

/// JWT claims for admin session tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Token subject
    pub sub: String,
    /// Issued-at (unix seconds)
    pub iat: u64,
    /// Expiry (unix seconds)
    pub exp: u64,
}

/// Compare a supplied password against the configured admin secret.
///
/// Comparison is exact string equality, case-sensitive.
pub fn verify_password(args: &Args, supplied: &str) -> Result<(), ApiError> {
    let secret = args
        .admin_password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Config("Password not configured".into()))?;

    if supplied == secret {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid password".into()))
    }
}

/// Issue a session token for a successful login.
pub fn issue_token(args: &Args) -> Result<String, ApiError> {
    match args.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
        Some(secret) => {
            let now = chrono::Utc::now().timestamp() as u64;
            let claims = Claims {
                sub: "portfolio-admin".to_string(),
                iat: now,
                exp: now + args.jwt_expiry_seconds,
            };
            encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(secret.as_bytes()),
            )
            .map_err(|e| ApiError::Internal(format!("Token signing failed: {}", e)))
        }
        // No signing secret configured: opaque placeholder token
        None => Ok(format!(
            "temp_token_{}",
            chrono::Utc::now().timestamp_millis()
        )),
    }
}
