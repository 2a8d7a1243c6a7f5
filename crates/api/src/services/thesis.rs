//! Thesis aggregate: header, tasks, missions, programs and member links.
//!
//! Every write runs in a single transaction; dropping the transaction on an
//! error path rolls back everything written so far.

use sqlx::PgPool;
use thesis_core::error::CoreError;
use thesis_core::roles::Role;
use thesis_core::types::DbId;
use thesis_db::models::person::PersonResponse;
use thesis_db::models::thesis::{
    CreateThesis, SetApproval, StudentStatusQuery, Thesis, ThesisChildren, ThesisDetail,
    UpdateThesis,
};
use thesis_db::repositories::{
    MemberKind, MissionRepo, PersonRepo, ProgramRepo, ThesisRepo, ThesisTaskRepo,
};
use uuid::Uuid;

use crate::error::AppResult;

const ENTITY: &str = "Thesis";

pub async fn list(pool: &PgPool) -> AppResult<Vec<ThesisDetail>> {
    let theses = ThesisRepo::list(pool).await?;
    load_details(pool, theses).await
}

pub async fn list_by_creator(pool: &PgPool, created_by: &str) -> AppResult<Vec<ThesisDetail>> {
    let theses = ThesisRepo::list_by_creator(pool, created_by).await?;
    load_details(pool, theses).await
}

pub async fn get(pool: &PgPool, uuid: Uuid) -> AppResult<ThesisDetail> {
    let thesis = ThesisRepo::find_by_uuid(pool, uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, uuid))?;
    load_detail(pool, thesis).await
}

/// Create every thesis in `items` together with its children and links.
pub async fn create_batch(
    pool: &PgPool,
    items: &[CreateThesis],
    actor: &str,
) -> AppResult<Vec<ThesisDetail>> {
    for item in items {
        let missing = item.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::MissingFields(missing).into());
        }
    }

    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(items.len());
    for item in items {
        let thesis = ThesisRepo::create(&mut tx, item, actor).await?;
        write_children(&mut tx, thesis.id, &item.children, actor).await?;
        created.push(thesis);
    }
    tx.commit().await?;

    tracing::info!(count = created.len(), actor, "Theses created");
    load_details(pool, created).await
}

/// Update theses by uuid.
///
/// Scalar fields are patched; links and child rows are always cleared and
/// re-created from the payload, so omitting a collection empties it.
pub async fn update_batch(
    pool: &PgPool,
    items: &[UpdateThesis],
    actor: &str,
) -> AppResult<Vec<ThesisDetail>> {
    let mut uuids = Vec::with_capacity(items.len());
    for item in items {
        let uuid = item
            .uuid
            .ok_or_else(|| CoreError::MissingFields(vec!["uuid".into()]))?;
        let missing = item.children.missing_task_fields();
        if !missing.is_empty() {
            return Err(CoreError::MissingFields(missing).into());
        }
        uuids.push(uuid);
    }

    let mut tx = pool.begin().await?;
    let mut updated = Vec::with_capacity(items.len());
    for (item, uuid) in items.iter().zip(uuids) {
        let thesis = ThesisRepo::update(&mut tx, uuid, item, actor)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, uuid))?;

        ThesisRepo::clear_members(&mut tx, thesis.id).await?;
        ThesisTaskRepo::delete_for_thesis(&mut tx, thesis.id).await?;
        MissionRepo::delete_for_thesis(&mut tx, thesis.id).await?;
        ProgramRepo::delete_for_thesis(&mut tx, thesis.id).await?;
        write_children(&mut tx, thesis.id, &item.children, actor).await?;

        updated.push(thesis);
    }
    tx.commit().await?;

    tracing::info!(count = updated.len(), actor, "Theses updated");
    load_details(pool, updated).await
}

/// Permanently delete a thesis; children and links go with it.
pub async fn delete(pool: &PgPool, uuid: Uuid, actor: &str) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    if !ThesisRepo::hard_delete(&mut tx, uuid).await? {
        return Err(CoreError::not_found(ENTITY, uuid).into());
    }
    tx.commit().await?;

    tracing::info!(%uuid, actor, "Thesis deleted");
    Ok(())
}

pub async fn add_member(
    pool: &PgPool,
    kind: MemberKind,
    thesis_uuid: Uuid,
    member_uuid: Uuid,
) -> AppResult<ThesisDetail> {
    let mut tx = pool.begin().await?;
    let (thesis_id, member_id) = resolve_link(&mut tx, kind, thesis_uuid, member_uuid).await?;
    ThesisRepo::add_member(&mut tx, kind, thesis_id, member_id).await?;
    tx.commit().await?;

    tracing::info!(?kind, %thesis_uuid, %member_uuid, "Thesis member added");
    get(pool, thesis_uuid).await
}

/// Remove a member link. A link that does not exist is `NotFound`.
pub async fn remove_member(
    pool: &PgPool,
    kind: MemberKind,
    thesis_uuid: Uuid,
    member_uuid: Uuid,
) -> AppResult<ThesisDetail> {
    let mut tx = pool.begin().await?;
    let (thesis_id, member_id) = resolve_link(&mut tx, kind, thesis_uuid, member_uuid).await?;
    if !ThesisRepo::remove_member(&mut tx, kind, thesis_id, member_id).await? {
        return Err(
            CoreError::not_found("ThesisMember", format!("{thesis_uuid}/{member_uuid}")).into(),
        );
    }
    tx.commit().await?;

    tracing::info!(?kind, %thesis_uuid, %member_uuid, "Thesis member removed");
    get(pool, thesis_uuid).await
}

pub async fn set_approval(
    pool: &PgPool,
    input: &SetApproval,
    actor: &str,
) -> AppResult<ThesisDetail> {
    let thesis = ThesisRepo::set_approval(pool, input.thesis_uuid, input.approval_status, actor)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, input.thesis_uuid))?;

    tracing::info!(
        uuid = %input.thesis_uuid,
        approval_status = input.approval_status,
        actor,
        "Thesis approval set"
    );
    load_detail(pool, thesis).await
}

/// Whether a student is linked to a thesis. Both must exist.
pub async fn student_status(pool: &PgPool, query: &StudentStatusQuery) -> AppResult<bool> {
    ThesisRepo::find_by_uuid(pool, query.thesis_uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, query.thesis_uuid))?;
    PersonRepo::find_by_uuid(pool, Role::Student, query.student_uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(Role::Student.entity_name(), query.student_uuid))?;

    let linked = ThesisRepo::has_student(pool, query.thesis_uuid, query.student_uuid).await?;
    Ok(linked)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Insert links, missions, programs and tasks for a thesis.
async fn write_children(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    thesis_id: DbId,
    children: &ThesisChildren,
    actor: &str,
) -> AppResult<()> {
    let members = children
        .students
        .iter()
        .map(|m| (MemberKind::Student, m.uuid))
        .chain(children.advisors.iter().map(|m| (MemberKind::Advisor, m.uuid)));
    for (kind, uuid) in members {
        let member_id = live_member_id(tx, kind, uuid).await?;
        ThesisRepo::add_member(tx, kind, thesis_id, member_id).await?;
    }

    for mission in &children.missions {
        MissionRepo::create(tx, thesis_id, &mission.value).await?;
    }
    for program in &children.programs {
        ProgramRepo::create(tx, thesis_id, program.value).await?;
    }
    for task in &children.thesis_task {
        ThesisTaskRepo::create(tx, thesis_id, task, actor).await?;
    }
    Ok(())
}

async fn live_member_id(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    kind: MemberKind,
    uuid: Uuid,
) -> AppResult<DbId> {
    let role = kind.role();
    let id = PersonRepo::find_live_id(tx, role, uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(role.entity_name(), uuid))?;
    Ok(id)
}

async fn resolve_link(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    kind: MemberKind,
    thesis_uuid: Uuid,
    member_uuid: Uuid,
) -> AppResult<(DbId, DbId)> {
    let thesis_id = ThesisRepo::find_live_id(tx, thesis_uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, thesis_uuid))?;
    let member_id = live_member_id(tx, kind, member_uuid).await?;
    Ok((thesis_id, member_id))
}

async fn load_details(pool: &PgPool, theses: Vec<Thesis>) -> AppResult<Vec<ThesisDetail>> {
    let mut details = Vec::with_capacity(theses.len());
    for thesis in theses {
        details.push(load_detail(pool, thesis).await?);
    }
    Ok(details)
}

async fn load_detail(pool: &PgPool, thesis: Thesis) -> AppResult<ThesisDetail> {
    let id = thesis.id;
    let thesis_task = ThesisTaskRepo::list_for_thesis(pool, id).await?;
    let missions = MissionRepo::list_for_thesis(pool, id).await?;
    let programs = ProgramRepo::list_for_thesis(pool, id).await?;
    let students = PersonRepo::list_for_thesis(pool, MemberKind::Student, id).await?;
    let advisors = PersonRepo::list_for_thesis(pool, MemberKind::Advisor, id).await?;

    Ok(ThesisDetail {
        thesis,
        thesis_task,
        missions,
        programs,
        students: students.into_iter().map(PersonResponse::from).collect(),
        advisors: advisors.into_iter().map(PersonResponse::from).collect(),
    })
}
