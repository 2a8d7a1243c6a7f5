//! Repository for the `tbl_thesis_task` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::thesis::{ThesisTask, ThesisTaskInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, thesis_id, created_by, updated_by, created_at, updated_at, \
    log_version, title, deadline, status, priority, description, note, start_time, end_time";

/// Provides child-row operations for thesis tasks.
pub struct ThesisTaskRepo;

impl ThesisTaskRepo {
    /// List the tasks of a thesis in insertion order.
    pub async fn list_for_thesis(
        pool: &PgPool,
        thesis_id: DbId,
    ) -> Result<Vec<ThesisTask>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tbl_thesis_task WHERE thesis_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, ThesisTask>(&query)
            .bind(thesis_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a task. Required fields must already be validated.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        thesis_id: DbId,
        input: &ThesisTaskInput,
        actor: &str,
    ) -> Result<ThesisTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO tbl_thesis_task (thesis_id, created_by, updated_by, title, deadline, \
                status, priority, description, note, start_time, end_time)
             VALUES ($1, $2, $2, $3, $4, $5, $6, COALESCE($7, ''), COALESCE($8, ''), \
                COALESCE($9, ''), COALESCE($10, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThesisTask>(&query)
            .bind(thesis_id)
            .bind(actor)
            .bind(&input.title)
            .bind(&input.deadline)
            .bind(&input.status)
            .bind(input.priority)
            .bind(&input.description)
            .bind(&input.note)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete every task of a thesis. Returns the number of rows removed.
    pub async fn delete_for_thesis(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        thesis_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tbl_thesis_task WHERE thesis_id = $1")
            .bind(thesis_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
