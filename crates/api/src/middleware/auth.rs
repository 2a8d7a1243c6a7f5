//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use thesis_core::error::CoreError;
use thesis_core::roles::Role;
use uuid::Uuid;

use crate::auth::jwt::{token_error, validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the session token as `Bearer <token>`.
pub const TOKEN_HEADER: &str = "bku-token";

/// Authenticated person extracted from the `bku-token` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(code = %user.code, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The person's external id (from `claims.sub`).
    pub uuid: Uuid,
    /// Display name from the token.
    pub name: String,
    /// Business code, recorded as `created_by` / `updated_by` / `deleted_by`.
    pub code: String,
    pub role: Role,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Core(CoreError::TokenMissing))?;

        let token = bearer_token(header).ok_or(AppError::Core(CoreError::TokenMissing))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|e| AppError::Core(token_error(&e)))?;

        Ok(AuthUser {
            uuid: claims.sub,
            name: claims.name.clone(),
            code: claims.code.clone(),
            role: claims.role,
            claims,
        })
    }
}

/// Extract `<token>` from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
