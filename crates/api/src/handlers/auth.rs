//! Handlers for sign-up, sign-in, logout and token checks.

use axum::extract::State;
use axum::Json;
use thesis_core::messages;
use thesis_db::models::person::{PersonResponse, SignUpEntry};

use crate::auth::jwt::Claims;
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::Envelope;
use crate::services::auth::{self, SignInRequest, SignInResponse};
use crate::state::AppState;

/// POST /signup
///
/// Register one or more persons, each in the table of its `role`.
pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(entries): ApiJson<Vec<SignUpEntry>>,
) -> AppResult<Json<Envelope<Vec<PersonResponse>>>> {
    let created = auth::sign_up(&state.pool, &entries).await?;
    Ok(Json(Envelope::ok(messages::SIGN_UP_SUCCESS, created)))
}

/// POST /signin
///
/// Authenticate with email + password against the table of `role`.
pub async fn sign_in(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SignInRequest>,
) -> AppResult<Json<Envelope<SignInResponse>>> {
    let session = auth::sign_in(&state.pool, &state.config.jwt, &input).await?;
    Ok(Json(Envelope::ok(messages::LOGIN_SUCCESS, session)))
}

/// POST /logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<Envelope<()>> {
    Json(Envelope::message(messages::LOGOUT_SUCCESS))
}

/// POST /check-token
///
/// Returns the decoded claims of a valid token.
pub async fn check_token(user: AuthUser) -> AppResult<Json<Envelope<Claims>>> {
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, user.claims)))
}
