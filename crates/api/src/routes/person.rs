//! Route definitions shared by the five person resources.

use axum::routing::{get, put};
use axum::{Extension, Router};
use thesis_core::roles::Role;

use crate::handlers::person;
use crate::state::AppState;

/// URL segment each person resource is mounted at.
pub fn path_segment(role: Role) -> &'static str {
    match role {
        Role::Student => "/student",
        Role::Advisor => "/advisor",
        Role::Council => "/council",
        Role::FacultyOffice => "/facultyoffice",
        Role::HeadOfSubject => "/headofsubject",
    }
}

/// Routes for one person resource; `role` picks the table.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create (staff)
/// PUT    /                     -> update (staff)
/// GET    /{uuid}               -> get_by_uuid
/// DELETE /{uuid}               -> delete (staff)
/// GET    /code/{code}          -> get_by_code
/// PUT    /restore/{uuid}       -> restore (staff)
/// ```
pub fn router(role: Role) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(person::list)
                .post(person::create)
                .put(person::update),
        )
        .route("/{uuid}", get(person::get_by_uuid).delete(person::delete))
        .route("/code/{code}", get(person::get_by_code))
        .route("/restore/{uuid}", put(person::restore))
        .layer(Extension(role))
}
