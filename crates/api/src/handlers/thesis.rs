//! Handlers for the `/thesis` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use thesis_core::messages;
use thesis_db::models::thesis::{
    CreateThesis, SetApproval, StudentStatusQuery, ThesisDetail, UpdateThesis,
};
use thesis_db::repositories::MemberKind;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::response::Envelope;
use crate::services::thesis;
use crate::state::AppState;

/// Payload of `POST /thesis/status-thesis`.
#[derive(Debug, Serialize)]
pub struct StudentStatus {
    pub status: bool,
}

/// GET /thesis
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<ThesisDetail>>>> {
    let theses = thesis::list(&state.pool).await?;
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, theses)))
}

/// GET /thesis/{uuid}
pub async fn get_by_uuid(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<Envelope<ThesisDetail>>> {
    let found = thesis::get(&state.pool, uuid).await?;
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, found)))
}

/// GET /thesis/created-by/{created_by}
pub async fn list_by_creator(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(created_by): ApiPath<String>,
) -> AppResult<Json<Envelope<Vec<ThesisDetail>>>> {
    let theses = thesis::list_by_creator(&state.pool, &created_by).await?;
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, theses)))
}

/// POST /thesis
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ApiJson(items): ApiJson<Vec<CreateThesis>>,
) -> AppResult<Json<Envelope<Vec<ThesisDetail>>>> {
    let created = thesis::create_batch(&state.pool, &items, &user.code).await?;
    Ok(Json(Envelope::ok(messages::CREATE_SUCCESS, created)))
}

/// PUT /thesis
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ApiJson(items): ApiJson<Vec<UpdateThesis>>,
) -> AppResult<Json<Envelope<Vec<ThesisDetail>>>> {
    let updated = thesis::update_batch(&state.pool, &items, &user.code).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, updated)))
}

/// PUT /thesis/approval
pub async fn set_approval(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SetApproval>,
) -> AppResult<Json<Envelope<ThesisDetail>>> {
    let updated = thesis::set_approval(&state.pool, &input, &user.code).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, updated)))
}

/// POST /thesis/status-thesis
pub async fn student_status(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiJson(query): ApiJson<StudentStatusQuery>,
) -> AppResult<Json<Envelope<StudentStatus>>> {
    let status = thesis::student_status(&state.pool, &query).await?;
    Ok(Json(Envelope::ok(
        messages::GET_DATA_SUCCESS,
        StudentStatus { status },
    )))
}

/// DELETE /thesis/{uuid}
pub async fn delete(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<Envelope<()>>> {
    thesis::delete(&state.pool, uuid, &user.code).await?;
    Ok(Json(Envelope::message(messages::DELETE_SUCCESS)))
}

/// POST /thesis/addstudent/{thesis_uuid}/{student_uuid}
pub async fn add_student(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath((thesis_uuid, student_uuid)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<Json<Envelope<ThesisDetail>>> {
    let updated =
        thesis::add_member(&state.pool, MemberKind::Student, thesis_uuid, student_uuid).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, updated)))
}

/// DELETE /thesis/removestudent/{thesis_uuid}/{student_uuid}
pub async fn remove_student(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath((thesis_uuid, student_uuid)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<Json<Envelope<ThesisDetail>>> {
    let updated =
        thesis::remove_member(&state.pool, MemberKind::Student, thesis_uuid, student_uuid).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, updated)))
}

/// POST /thesis/addadvisor/{thesis_uuid}/{advisor_uuid}
pub async fn add_advisor(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath((thesis_uuid, advisor_uuid)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<Json<Envelope<ThesisDetail>>> {
    let updated =
        thesis::add_member(&state.pool, MemberKind::Advisor, thesis_uuid, advisor_uuid).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, updated)))
}

/// DELETE /thesis/removeadvisor/{thesis_uuid}/{advisor_uuid}
pub async fn remove_advisor(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath((thesis_uuid, advisor_uuid)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<Json<Envelope<ThesisDetail>>> {
    let updated =
        thesis::remove_member(&state.pool, MemberKind::Advisor, thesis_uuid, advisor_uuid).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, updated)))
}
