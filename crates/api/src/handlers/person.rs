//! Handlers shared by the five person resources.
//!
//! The role (and so the table) comes from the `Extension<Role>` installed by
//! [`routes::person::router`](crate::routes::person::router).

use axum::extract::State;
use axum::{Extension, Json};
use thesis_core::messages;
use thesis_core::roles::Role;
use thesis_db::models::person::{CreatePerson, PersonResponse, UpdatePerson};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::response::Envelope;
use crate::services::person;
use crate::state::AppState;

/// GET /{entity}
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
) -> AppResult<Json<Envelope<Vec<PersonResponse>>>> {
    let persons = person::list(&state.pool, role).await?;
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, persons)))
}

/// GET /{entity}/{uuid}
pub async fn get_by_uuid(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<Envelope<PersonResponse>>> {
    let found = person::get_by_uuid(&state.pool, role, uuid).await?;
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, found)))
}

/// GET /{entity}/code/{code}
pub async fn get_by_code(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    ApiPath(code): ApiPath<String>,
) -> AppResult<Json<Envelope<PersonResponse>>> {
    let found = person::get_by_code(&state.pool, role, &code).await?;
    Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, found)))
}

/// POST /{entity}
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    ApiJson(items): ApiJson<Vec<CreatePerson>>,
) -> AppResult<Json<Envelope<Vec<PersonResponse>>>> {
    let created = person::create_batch(&state.pool, role, &items, &user.code).await?;
    Ok(Json(Envelope::ok(messages::CREATE_SUCCESS, created)))
}

/// PUT /{entity}
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    ApiJson(items): ApiJson<Vec<UpdatePerson>>,
) -> AppResult<Json<Envelope<Vec<PersonResponse>>>> {
    let changed = person::update_batch(&state.pool, role, items, &user.code).await?;
    Ok(Json(Envelope::ok(messages::UPDATE_SUCCESS, changed)))
}

/// DELETE /{entity}/{uuid}
pub async fn delete(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<Envelope<()>>> {
    person::soft_delete(&state.pool, role, uuid, &user.code).await?;
    Ok(Json(Envelope::message(messages::DELETE_SUCCESS)))
}

/// PUT /{entity}/restore/{uuid}
pub async fn restore(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    ApiPath(uuid): ApiPath<Uuid>,
) -> AppResult<Json<Envelope<PersonResponse>>> {
    let restored = person::restore(&state.pool, role, uuid, &user.code).await?;
    Ok(Json(Envelope::ok(messages::RESTORE_SUCCESS, restored)))
}
