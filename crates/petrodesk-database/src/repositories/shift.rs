//! Shift repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use petrodesk_core::error::{AppError, ErrorKind};
use petrodesk_core::result::AppResult;
use petrodesk_entity::schedule::shift::{CreateShift, Shift};

/// Repository for scheduled shifts.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    /// Create a new shift repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a project's shifts for one date.
    pub async fn find_by_project_and_date(
        &self,
        project_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Shift>> {
        sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE project_id = $1 AND date = $2 ORDER BY start_time",
        )
        .bind(project_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shifts", e))
    }

    /// List one employee's upcoming and past shifts, newest first.
    pub async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Shift>> {
        sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE employee_id = $1 ORDER BY date DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list employee shifts", e)
        })
    }

    /// Insert a shift.
    ///
    /// The `(project_id, employee_id, date)` unique constraint turns a
    /// same-day duplicate into a `Conflict`.
    pub async fn create(&self, data: &CreateShift) -> AppResult<Shift> {
        sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts
                (project_id, employee_id, date, start_time, end_time, kind)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(data.employee_id)
        .bind(data.date)
        .bind(&data.start_time)
        .bind(&data.end_time)
        .bind(data.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("shifts_project_id_employee_id_date_key") =>
            {
                AppError::conflict(format!(
                    "Shift for employee {} on {} already scheduled",
                    data.employee_id, data.date
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create shift", e),
        })
    }

    /// Delete a shift. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete shift", e))?;
        Ok(result.rows_affected() > 0)
    }
}
