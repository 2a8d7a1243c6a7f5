//! Repository for the five person tables.
//!
//! Every method takes the [`Role`] whose table it operates on. Reads accept
//! `&PgPool`; writes that belong to a batch run inside the caller's
//! transaction.

use sqlx::PgPool;
use thesis_core::roles::Role;
use thesis_core::types::DbId;
use uuid::Uuid;

use crate::models::person::{CreatePerson, Person, UpdatePerson};
use crate::repositories::thesis_repo::MemberKind;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, created_by, updated_by, deleted_by, created_at, updated_at, \
    deleted_at, log_version, is_deleted, password, first_name, last_name, full_name, email, \
    address, gender, phone_number, birthday, image, role, code, status";

/// Table holding rows for `role`.
pub fn person_table(role: Role) -> &'static str {
    match role {
        Role::Student => "tbl_student",
        Role::Advisor => "tbl_advisor",
        Role::HeadOfSubject => "tbl_head_of_subject",
        Role::FacultyOffice => "tbl_faculty_office",
        Role::Council => "tbl_council",
    }
}

/// Provides CRUD and soft-delete lifecycle operations for persons.
pub struct PersonRepo;

impl PersonRepo {
    /// List live rows ordered by id ascending.
    pub async fn list(pool: &PgPool, role: Role) -> Result<Vec<Person>, sqlx::Error> {
        let table = person_table(role);
        let query =
            format!("SELECT {COLUMNS} FROM {table} WHERE deleted_at IS NULL ORDER BY id ASC");
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }

    /// Find a live row by external id.
    pub async fn find_by_uuid(
        pool: &PgPool,
        role: Role,
        uuid: Uuid,
    ) -> Result<Option<Person>, sqlx::Error> {
        let table = person_table(role);
        let query =
            format!("SELECT {COLUMNS} FROM {table} WHERE uuid = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Person>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Find a live row by business code.
    pub async fn find_by_code(
        pool: &PgPool,
        role: Role,
        code: &str,
    ) -> Result<Option<Person>, sqlx::Error> {
        let table = person_table(role);
        let query =
            format!("SELECT {COLUMNS} FROM {table} WHERE code = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Person>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a live row by email, case-insensitively.
    pub async fn find_by_email(
        pool: &PgPool,
        role: Role,
        email: &str,
    ) -> Result<Option<Person>, sqlx::Error> {
        let table = person_table(role);
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE email = lower($1) AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a row by external id, including soft-deleted rows. Used by restore.
    pub async fn find_by_uuid_include_deleted(
        pool: &PgPool,
        role: Role,
        uuid: Uuid,
    ) -> Result<Option<Person>, sqlx::Error> {
        let table = person_table(role);
        let query = format!("SELECT {COLUMNS} FROM {table} WHERE uuid = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the internal id of a live row inside a transaction.
    pub async fn find_live_id(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        role: Role,
        uuid: Uuid,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let table = person_table(role);
        let query = format!("SELECT id FROM {table} WHERE uuid = $1 AND deleted_at IS NULL");
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(uuid)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a person. `input` must already have passed required-field
    /// validation; email is stored lower-cased.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        role: Role,
        input: &CreatePerson,
        password_hash: &str,
        actor: &str,
    ) -> Result<Person, sqlx::Error> {
        let table = person_table(role);
        let query = format!(
            "INSERT INTO {table} (created_by, updated_by, password, first_name, last_name, \
                full_name, email, address, gender, phone_number, birthday, image, role, code, \
                status)
             VALUES ($1, $1, $2, $3, $4, $5, lower($6), $7, $8, $9, $10, COALESCE($11, ''), \
                $12, $13, COALESCE($14, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(actor)
            .bind(password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.gender)
            .bind(&input.phone_number)
            .bind(&input.birthday)
            .bind(&input.image)
            .bind(role.as_i32())
            .bind(&input.code)
            .bind(input.status)
            .fetch_one(&mut **tx)
            .await
    }

    /// Apply every supplied field of `input` to the live row with `uuid`.
    ///
    /// `password_hash` replaces the stored hash only when `Some`. Bumps
    /// `log_version`. Returns `None` if no live row matches.
    pub async fn update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        role: Role,
        uuid: Uuid,
        input: &UpdatePerson,
        password_hash: Option<&str>,
        actor: &str,
    ) -> Result<Option<Person>, sqlx::Error> {
        let table = person_table(role);
        let query = format!(
            "UPDATE {table} SET
                code = COALESCE($2, code),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                full_name = COALESCE($5, full_name),
                email = COALESCE(lower($6), email),
                phone_number = COALESCE($7, phone_number),
                birthday = COALESCE($8, birthday),
                address = COALESCE($9, address),
                gender = COALESCE($10, gender),
                image = COALESCE($11, image),
                status = COALESCE($12, status),
                password = COALESCE($13, password),
                updated_by = $14,
                updated_at = NOW(),
                log_version = log_version + 1
             WHERE uuid = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(uuid)
            .bind(&input.code)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.birthday)
            .bind(&input.address)
            .bind(&input.gender)
            .bind(&input.image)
            .bind(input.status)
            .bind(password_hash)
            .bind(actor)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Soft-delete a live row. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        role: Role,
        uuid: Uuid,
        actor: &str,
    ) -> Result<bool, sqlx::Error> {
        let table = person_table(role);
        let query = format!(
            "UPDATE {table} SET deleted_at = NOW(), is_deleted = TRUE, deleted_by = $2, \
                log_version = log_version + 1
             WHERE uuid = $1 AND deleted_at IS NULL"
        );
        let result = sqlx::query(&query)
            .bind(uuid)
            .bind(actor)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted row. Returns `true` if a row was restored.
    pub async fn restore(
        pool: &PgPool,
        role: Role,
        uuid: Uuid,
        actor: &str,
    ) -> Result<bool, sqlx::Error> {
        let table = person_table(role);
        let query = format!(
            "UPDATE {table} SET deleted_at = NULL, is_deleted = FALSE, deleted_by = NULL, \
                updated_by = $2, updated_at = NOW(), log_version = log_version + 1
             WHERE uuid = $1 AND deleted_at IS NOT NULL"
        );
        let result = sqlx::query(&query)
            .bind(uuid)
            .bind(actor)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Live members of kind `kind` linked to the thesis with internal id `thesis_id`.
    pub async fn list_for_thesis(
        pool: &PgPool,
        kind: MemberKind,
        thesis_id: DbId,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let (link_table, link_column) = kind.link();
        let table = person_table(kind.role());
        let query = format!(
            "SELECT {} FROM {table} p \
             JOIN {link_table} l ON l.{link_column} = p.id \
             WHERE l.thesis_id = $1 AND p.deleted_at IS NULL \
             ORDER BY p.id ASC",
            prefixed_columns("p")
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(thesis_id)
            .fetch_all(pool)
            .await
    }
}

fn prefixed_columns(alias: &str) -> String {
    COLUMNS
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_its_own_table() {
        let tables: std::collections::HashSet<_> =
            Role::ALL.into_iter().map(person_table).collect();
        assert_eq!(tables.len(), Role::ALL.len());
    }

    #[test]
    fn prefixed_columns_qualifies_every_column() {
        let cols = prefixed_columns("p");
        assert!(cols.starts_with("p.id, p.uuid"));
        assert!(cols.ends_with("p.status"));
        assert_eq!(cols.matches("p.").count(), COLUMNS.split(',').count());
    }
}
