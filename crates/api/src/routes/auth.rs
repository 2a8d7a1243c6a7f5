//! Route definitions for authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST   /signup         -> sign_up (public)
/// POST   /signin         -> sign_in (public)
/// POST   /logout         -> logout (public)
/// POST   /check-token    -> check_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::sign_up))
        .route("/signin", post(auth::sign_in))
        .route("/logout", post(auth::logout))
        .route("/check-token", post(auth::check_token))
}
