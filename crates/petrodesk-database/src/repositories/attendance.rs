//! Attendance repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use petrodesk_core::error::{AppError, ErrorKind};
use petrodesk_core::result::AppResult;
use petrodesk_entity::schedule::attendance::Attendance;

/// Repository for daily attendance records.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Create a new attendance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a project's attendance for one date.
    pub async fn find_by_project_and_date(
        &self,
        project_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Attendance>> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE project_id = $1 AND date = $2 ORDER BY check_in",
        )
        .bind(project_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attendance", e))
    }

    /// List one employee's attendance history, newest first.
    pub async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Attendance>> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE employee_id = $1 ORDER BY date DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list employee attendance", e)
        })
    }

    /// Insert an attendance record with a precomputed hour total.
    ///
    /// The `(project_id, employee_id, date)` unique constraint turns a
    /// same-day duplicate into a `Conflict`.
    pub async fn create(
        &self,
        project_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
        check_in: &str,
        check_out: &str,
        total_hours: f64,
    ) -> AppResult<Attendance> {
        sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendance
                (project_id, employee_id, date, check_in, check_out, total_hours)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(employee_id)
        .bind(date)
        .bind(check_in)
        .bind(check_out)
        .bind(total_hours)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("attendance_project_id_employee_id_date_key") =>
            {
                AppError::conflict(format!(
                    "Attendance for employee {employee_id} on {date} already recorded"
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create attendance", e),
        })
    }

    /// Delete an attendance record. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete attendance", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
