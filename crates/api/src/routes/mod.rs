pub mod auth;
pub mod health;
pub mod person;
pub mod thesis;

use axum::Router;
use thesis_core::roles::Role;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy (`{entity}` is one of `student`, `advisor`, `council`,
/// `facultyoffice`, `headofsubject`):
///
/// ```text
/// /signup, /signin, /logout                        public
/// /check-token                                     verify token
///
/// /{entity}                                        list, create, update
/// /{entity}/{uuid}                                 get, soft delete
/// /{entity}/code/{code}                            get by code
/// /{entity}/restore/{uuid}                         restore
///
/// /thesis                                          list, create, update
/// /thesis/{uuid}                                   get, hard delete
/// /thesis/created-by/{created_by}                  list by creator
/// /thesis/approval                                 set approval status
/// /thesis/status-thesis                            student membership
/// /thesis/{add,remove}{student,advisor}/{thesis_uuid}/{uuid}
/// ```
///
/// `/health` is merged separately by the router builder.
pub fn api_routes() -> Router<AppState> {
    let router = Router::new()
        .merge(auth::router())
        .nest("/thesis", thesis::router());

    Role::ALL.into_iter().fold(router, |router, role| {
        router.nest(person::path_segment(role), person::router(role))
    })
}
