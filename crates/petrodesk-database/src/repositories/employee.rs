//! Employee repository implementation.
//!
//! The folder tree lives in the `folders` JSONB column and is saved as a
//! whole. Tree writes go through [`EmployeeRepository::save_tree`], a
//! compare-and-swap on the `version` column so concurrent mutations of the
//! same employee cannot silently overwrite each other.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use petrodesk_core::error::{AppError, ErrorKind};
use petrodesk_core::result::AppResult;
use petrodesk_entity::employee::folder::FolderTree;
use petrodesk_entity::employee::model::{CreateEmployee, Employee, UpdateEmployee};

/// Repository for employee CRUD and folder-tree persistence.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an employee by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find employee by id", e)
            })
    }

    /// List all employees, most recently hired first.
    pub async fn find_all(&self) -> AppResult<Vec<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY hire_date DESC, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list employees", e))
    }

    /// Insert a new employee row.
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees
                (first_name, last_name, email, phone, position, hire_date,
                 profile_image_url, folders)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.position)
        .bind(data.hire_date)
        .bind(&data.profile_image_url)
        .bind(Json(&data.folders))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("employees_email_key") =>
            {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create employee", e),
        })
    }

    /// Update profile fields; `None` fields are left unchanged.
    ///
    /// Does not touch the folder tree or its version.
    pub async fn update(&self, id: Uuid, data: &UpdateEmployee) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                position = COALESCE($6, position),
                profile_image_url = COALESCE($7, profile_image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.position)
        .bind(&data.profile_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("employees_email_key") =>
            {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update employee", e),
        })
    }

    /// Persist a mutated folder tree with a version compare-and-swap.
    ///
    /// Saves only when the stored `version` still equals `expected_version`,
    /// bumping it by one. Returns `Conflict` when the row was modified in the
    /// meantime (or no longer exists); callers reload and retry.
    pub async fn save_tree(
        &self,
        id: Uuid,
        tree: &FolderTree,
        expected_version: i64,
    ) -> AppResult<Employee> {
        let updated = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                folders = $3,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_version)
        .bind(Json(tree))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save folder tree", e)
        })?;

        updated.ok_or_else(|| {
            AppError::conflict(format!(
                "Employee {id} was modified concurrently (expected version {expected_version})"
            ))
        })
    }

    /// Delete an employee row. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete employee", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
