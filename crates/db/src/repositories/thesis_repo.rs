//! Repository for `tbl_thesis` and its student/advisor association tables.

use sqlx::PgPool;
use thesis_core::roles::Role;
use thesis_core::types::DbId;
use uuid::Uuid;

use crate::models::thesis::{CreateThesis, Thesis, UpdateThesis};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, created_by, updated_by, deleted_by, created_at, updated_at, \
    deleted_at, log_version, is_deleted, title_vi, title_en, approval_status, thesis_type, \
    semester, user_role_owner, thesis_info, start_time, end_time";

/// Which association table a member link lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Student,
    Advisor,
}

impl MemberKind {
    /// Person role whose table holds members of this kind.
    pub fn role(self) -> Role {
        match self {
            MemberKind::Student => Role::Student,
            MemberKind::Advisor => Role::Advisor,
        }
    }

    /// Association table and member column.
    pub(crate) fn link(self) -> (&'static str, &'static str) {
        match self {
            MemberKind::Student => ("tbl_thesis_student", "student_id"),
            MemberKind::Advisor => ("tbl_thesis_advisor", "advisor_id"),
        }
    }
}

/// Provides CRUD and membership operations for theses.
pub struct ThesisRepo;

impl ThesisRepo {
    /// List live theses ordered by id ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Thesis>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tbl_thesis WHERE deleted_at IS NULL ORDER BY id ASC");
        sqlx::query_as::<_, Thesis>(&query).fetch_all(pool).await
    }

    /// List live theses recorded as created by `created_by`.
    pub async fn list_by_creator(
        pool: &PgPool,
        created_by: &str,
    ) -> Result<Vec<Thesis>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tbl_thesis \
             WHERE created_by = $1 AND deleted_at IS NULL ORDER BY id ASC"
        );
        sqlx::query_as::<_, Thesis>(&query)
            .bind(created_by)
            .fetch_all(pool)
            .await
    }

    /// Find a live thesis by external id.
    pub async fn find_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<Thesis>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tbl_thesis WHERE uuid = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Thesis>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the internal id of a live thesis inside a transaction.
    pub async fn find_live_id(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        uuid: Uuid,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM tbl_thesis WHERE uuid = $1 AND deleted_at IS NULL",
        )
        .bind(uuid)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Insert a thesis header row. Required fields must already be validated.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateThesis,
        actor: &str,
    ) -> Result<Thesis, sqlx::Error> {
        let query = format!(
            "INSERT INTO tbl_thesis (created_by, updated_by, title_vi, title_en, semester, \
                approval_status, thesis_type, user_role_owner, thesis_info, start_time, end_time)
             VALUES ($1, $1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, ''), \
                COALESCE($9, ''), COALESCE($10, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thesis>(&query)
            .bind(actor)
            .bind(&input.title_vi)
            .bind(&input.title_en)
            .bind(&input.semester)
            .bind(input.approval_status)
            .bind(input.thesis_type)
            .bind(input.user_role_owner)
            .bind(&input.thesis_info)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .fetch_one(&mut **tx)
            .await
    }

    /// Apply supplied scalar fields and bump `log_version`.
    ///
    /// Returns `None` if no live thesis has `uuid`.
    pub async fn update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        uuid: Uuid,
        input: &UpdateThesis,
        actor: &str,
    ) -> Result<Option<Thesis>, sqlx::Error> {
        let query = format!(
            "UPDATE tbl_thesis SET
                title_vi = COALESCE($2, title_vi),
                title_en = COALESCE($3, title_en),
                semester = COALESCE($4, semester),
                approval_status = COALESCE($5, approval_status),
                thesis_type = COALESCE($6, thesis_type),
                user_role_owner = COALESCE($7, user_role_owner),
                thesis_info = COALESCE($8, thesis_info),
                start_time = COALESCE($9, start_time),
                end_time = COALESCE($10, end_time),
                updated_by = $11,
                updated_at = NOW(),
                log_version = log_version + 1
             WHERE uuid = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thesis>(&query)
            .bind(uuid)
            .bind(&input.title_vi)
            .bind(&input.title_en)
            .bind(&input.semester)
            .bind(input.approval_status)
            .bind(input.thesis_type)
            .bind(input.user_role_owner)
            .bind(&input.thesis_info)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(actor)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Set the approval status of a live thesis. Returns `None` if absent.
    pub async fn set_approval(
        pool: &PgPool,
        uuid: Uuid,
        approval_status: i32,
        actor: &str,
    ) -> Result<Option<Thesis>, sqlx::Error> {
        let query = format!(
            "UPDATE tbl_thesis SET approval_status = $2, updated_by = $3, updated_at = NOW(), \
                log_version = log_version + 1
             WHERE uuid = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thesis>(&query)
            .bind(uuid)
            .bind(approval_status)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a thesis. Children and links cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn hard_delete(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        uuid: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tbl_thesis WHERE uuid = $1")
            .bind(uuid)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Member association helpers
    // -----------------------------------------------------------------------

    /// Link a member to a thesis (idempotent).
    pub async fn add_member(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        kind: MemberKind,
        thesis_id: DbId,
        member_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let (table, column) = kind.link();
        let query = format!(
            "INSERT INTO {table} (thesis_id, {column}) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        );
        sqlx::query(&query)
            .bind(thesis_id)
            .bind(member_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Remove a member link. Returns `true` if the link existed.
    pub async fn remove_member(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        kind: MemberKind,
        thesis_id: DbId,
        member_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (table, column) = kind.link();
        let query = format!("DELETE FROM {table} WHERE thesis_id = $1 AND {column} = $2");
        let result = sqlx::query(&query)
            .bind(thesis_id)
            .bind(member_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drop every student and advisor link of a thesis.
    pub async fn clear_members(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        thesis_id: DbId,
    ) -> Result<(), sqlx::Error> {
        for kind in [MemberKind::Student, MemberKind::Advisor] {
            let (table, _) = kind.link();
            let query = format!("DELETE FROM {table} WHERE thesis_id = $1");
            sqlx::query(&query)
                .bind(thesis_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Whether the student with external id `student_uuid` is linked to the
    /// thesis with external id `thesis_uuid`.
    pub async fn has_student(
        pool: &PgPool,
        thesis_uuid: Uuid,
        student_uuid: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM tbl_thesis_student l \
                JOIN tbl_thesis t ON t.id = l.thesis_id \
                JOIN tbl_student s ON s.id = l.student_id \
                WHERE t.uuid = $1 AND s.uuid = $2 \
                  AND t.deleted_at IS NULL AND s.deleted_at IS NULL \
             )",
        )
        .bind(thesis_uuid)
        .bind(student_uuid)
        .fetch_one(pool)
        .await
    }
}
