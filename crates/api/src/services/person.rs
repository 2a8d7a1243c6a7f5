//! Person lifecycle shared by all five role tables: batch create, batch
//! update, soft delete and restore.

use sqlx::PgPool;
use thesis_core::error::CoreError;
use thesis_core::messages;
use thesis_core::roles::Role;
use thesis_db::models::person::{CreatePerson, PersonResponse, UpdatePerson};
use thesis_db::repositories::PersonRepo;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::services::auth::validate_new_credentials;

pub async fn list(pool: &PgPool, role: Role) -> AppResult<Vec<PersonResponse>> {
    let persons = PersonRepo::list(pool, role).await?;
    Ok(persons.into_iter().map(PersonResponse::from).collect())
}

pub async fn get_by_uuid(pool: &PgPool, role: Role, uuid: Uuid) -> AppResult<PersonResponse> {
    let person = PersonRepo::find_by_uuid(pool, role, uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(role.entity_name(), uuid))?;
    Ok(person.into())
}

pub async fn get_by_code(pool: &PgPool, role: Role, code: &str) -> AppResult<PersonResponse> {
    let person = PersonRepo::find_by_code(pool, role, code)
        .await?
        .ok_or_else(|| CoreError::not_found(role.entity_name(), code))?;
    Ok(person.into())
}

/// Create every item or none.
///
/// The first item with missing required fields or unusable credentials
/// aborts the batch before any write; the error lists all of that item's
/// offending fields.
pub async fn create_batch(
    pool: &PgPool,
    role: Role,
    items: &[CreatePerson],
    actor: &str,
) -> AppResult<Vec<PersonResponse>> {
    for item in items {
        ensure_complete(item)?;
    }

    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(items.len());
    for item in items {
        created.push(insert(&mut tx, role, item, actor).await?);
    }
    tx.commit().await?;

    tracing::info!(role = %role, count = created.len(), actor, "Persons created");
    Ok(created)
}

/// Apply a batch of updates in one transaction.
///
/// Per item: `isDeleted: true` soft-deletes, a missing `uuid` creates, and
/// anything else patches the supplied fields. Returns the created and updated
/// rows; soft-deleted items are not echoed back.
pub async fn update_batch(
    pool: &PgPool,
    role: Role,
    items: Vec<UpdatePerson>,
    actor: &str,
) -> AppResult<Vec<PersonResponse>> {
    let mut tx = pool.begin().await?;
    let mut changed = Vec::with_capacity(items.len());
    let mut deleted = 0usize;

    for item in items {
        let Some(uuid) = item.uuid else {
            let create = CreatePerson::from(item);
            ensure_complete(&create)?;
            changed.push(insert(&mut tx, role, &create, actor).await?);
            continue;
        };

        if item.is_deleted == Some(true) {
            if !PersonRepo::soft_delete(&mut tx, role, uuid, actor).await? {
                return Err(CoreError::not_found(role.entity_name(), uuid).into());
            }
            deleted += 1;
            continue;
        }

        let blanked = item.blanked_required_fields();
        if !blanked.is_empty() {
            return Err(CoreError::Validation {
                key: messages::REQUIRE,
                fields: blanked,
            }
            .into());
        }

        let new_password = item.password.as_deref().filter(|p| !p.is_empty());
        validate_new_credentials(item.email.as_deref(), new_password)?;
        let password_hash = new_password.map(hash).transpose()?;
        let person =
            PersonRepo::update(&mut tx, role, uuid, &item, password_hash.as_deref(), actor)
                .await?
                .ok_or_else(|| CoreError::not_found(role.entity_name(), uuid))?;
        changed.push(person.into());
    }
    tx.commit().await?;

    tracing::info!(
        role = %role,
        changed = changed.len(),
        deleted,
        actor,
        "Persons updated"
    );
    Ok(changed)
}

/// Soft-delete a live person.
pub async fn soft_delete(pool: &PgPool, role: Role, uuid: Uuid, actor: &str) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    if !PersonRepo::soft_delete(&mut tx, role, uuid, actor).await? {
        return Err(CoreError::not_found(role.entity_name(), uuid).into());
    }
    tx.commit().await?;

    tracing::info!(role = %role, %uuid, actor, "Person soft-deleted");
    Ok(())
}

/// Bring a soft-deleted person back. Fails with `AlreadyRestored` if the
/// row is live.
pub async fn restore(
    pool: &PgPool,
    role: Role,
    uuid: Uuid,
    actor: &str,
) -> AppResult<PersonResponse> {
    let person = PersonRepo::find_by_uuid_include_deleted(pool, role, uuid)
        .await?
        .ok_or_else(|| CoreError::not_found(role.entity_name(), uuid))?;
    if person.deleted_at.is_none() {
        return Err(CoreError::AlreadyRestored.into());
    }

    // A concurrent restore may win between the lookup and the update.
    if !PersonRepo::restore(pool, role, uuid, actor).await? {
        return Err(CoreError::AlreadyRestored.into());
    }

    tracing::info!(role = %role, %uuid, actor, "Person restored");
    get_by_uuid(pool, role, uuid).await
}

fn ensure_complete(item: &CreatePerson) -> Result<(), CoreError> {
    let missing = item.missing_fields();
    if !missing.is_empty() {
        return Err(CoreError::MissingFields(missing));
    }
    validate_new_credentials(item.email.as_deref(), item.password.as_deref())
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn insert(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    role: Role,
    item: &CreatePerson,
    actor: &str,
) -> AppResult<PersonResponse> {
    let password_hash = hash(item.password.as_deref().unwrap_or_default())?;
    let person = PersonRepo::create(tx, role, item, &password_hash, actor).await?;
    Ok(person.into())
}
