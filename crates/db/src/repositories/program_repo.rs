//! Repository for the `tbl_thesis_program` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::thesis::Program;

const COLUMNS: &str = "id, thesis_id, value, created_at";

pub struct ProgramRepo;

impl ProgramRepo {
    pub async fn list_for_thesis(
        pool: &PgPool,
        thesis_id: DbId,
    ) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tbl_thesis_program WHERE thesis_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(thesis_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        thesis_id: DbId,
        value: i32,
    ) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO tbl_thesis_program (thesis_id, value) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(thesis_id)
            .bind(value)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn delete_for_thesis(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        thesis_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tbl_thesis_program WHERE thesis_id = $1")
            .bind(thesis_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
