//! Project repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use petrodesk_core::error::{AppError, ErrorKind};
use petrodesk_core::result::AppResult;
use petrodesk_entity::project::model::{CreateProject, Project};

/// Repository for project CRUD and assignment operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find project by id", e)
            })
    }

    /// List all projects, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// Insert a new project row with an empty assignment list.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, location, employee_ids) \
             VALUES ($1, $2, '[]'::jsonb) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("projects_name_key") =>
            {
                AppError::conflict(format!("Project '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create project", e),
        })
    }

    /// Replace the full assignment list.
    pub async fn set_employees(
        &self,
        id: Uuid,
        employee_ids: &[Uuid],
    ) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET employee_ids = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(employee_ids))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update project assignments", e)
        })
    }

    /// Remove an employee from every project's assignment list.
    ///
    /// Used when an employee is deleted. Returns the ids of the projects
    /// touched so their cache entries can be dropped.
    pub async fn unassign_everywhere(&self, employee_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "UPDATE projects SET employee_ids = employee_ids - $1, updated_at = NOW() \
             WHERE employee_ids @> to_jsonb(ARRAY[$1]) RETURNING id",
        )
        .bind(employee_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to unassign employee", e)
        })
    }

    /// Delete a project row. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
