use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Sessions outlive a browser restart but not a week of inactivity.
const SESSION_DAYS: i64 = 7;

/// Generates a signed session token for a user id.
///
/// Requires the `SESSION_SECRET` environment variable; it is read at call
/// time so the binary fails per-request rather than at import when the
/// secret is missing.
pub fn generate_token(user_id: i64) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::days(SESSION_DAYS))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    let secret = std::env::var("SESSION_SECRET")
        .map_err(|_| AppError::InternalServerError("SESSION_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a session token and decodes its claims.
///
/// Returns `AppError::Unauthorized` for a malformed, forged, or expired
/// token; `AppError::InternalServerError` when `SESSION_SECRET` is unset.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("SESSION_SECRET")
        .map_err(|_| AppError::InternalServerError("SESSION_SECRET not set".into()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))
}
