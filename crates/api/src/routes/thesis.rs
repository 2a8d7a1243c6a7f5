//! Route definitions for the `/thesis` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::thesis;
use crate::state::AppState;

/// Routes mounted at `/thesis`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// PUT    /                                        -> update
/// PUT    /approval                                -> set_approval (staff)
/// POST   /status-thesis                           -> student_status
/// GET    /created-by/{created_by}                 -> list_by_creator
/// GET    /{uuid}                                  -> get_by_uuid
/// DELETE /{uuid}                                  -> delete
/// POST   /addstudent/{thesis_uuid}/{student_uuid}     -> add_student
/// DELETE /removestudent/{thesis_uuid}/{student_uuid}  -> remove_student
/// POST   /addadvisor/{thesis_uuid}/{advisor_uuid}     -> add_advisor
/// DELETE /removeadvisor/{thesis_uuid}/{advisor_uuid}  -> remove_advisor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(thesis::list).post(thesis::create).put(thesis::update),
        )
        .route("/approval", put(thesis::set_approval))
        .route("/status-thesis", post(thesis::student_status))
        .route("/created-by/{created_by}", get(thesis::list_by_creator))
        .route("/{uuid}", get(thesis::get_by_uuid).delete(thesis::delete))
        .route(
            "/addstudent/{thesis_uuid}/{student_uuid}",
            post(thesis::add_student),
        )
        .route(
            "/removestudent/{thesis_uuid}/{student_uuid}",
            delete(thesis::remove_student),
        )
        .route(
            "/addadvisor/{thesis_uuid}/{advisor_uuid}",
            post(thesis::add_advisor),
        )
        .route(
            "/removeadvisor/{thesis_uuid}/{advisor_uuid}",
            delete(thesis::remove_advisor),
        )
}
