//! Session token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. There is no
//! server-side session store: logout is the client discarding its token.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thesis_core::error::CoreError;
use thesis_core::roles::Role;
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the person's external id.
    pub sub: Uuid,
    /// Display name (the person's full name).
    pub name: String,
    /// Business code of the person, recorded as the actor on writes.
    pub code: String,
    /// Role table the person belongs to.
    pub role: Role,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 60).
    pub expiry_mins: i64,
}

/// Default token lifetime in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET_KEY`   | **yes**  | --      |
    /// | `JWT_EXPIRED_TIME` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET_KEY")
            .expect("JWT_SECRET_KEY must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET_KEY must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRED_TIME")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRED_TIME must be a valid i64 (minutes)");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Generate an HS256 session token for a person.
pub fn generate_access_token(
    subject: Uuid,
    name: &str,
    code: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: subject,
        name: name.to_string(),
        code: code.to_string(),
        role,
        iat: now,
        exp: now + config.expiry_mins * 60,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Expiry is checked with zero leeway.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Map a token validation failure to the domain error reported to clients.
pub fn token_error(err: &jsonwebtoken::errors::Error) -> CoreError {
    match err.kind() {
        ErrorKind::ExpiredSignature => CoreError::TokenExpired,
        _ => CoreError::TokenInvalid,
    }
}
