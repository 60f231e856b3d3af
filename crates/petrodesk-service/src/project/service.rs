//! Project CRUD and employee assignment.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use petrodesk_cache::keys;
use petrodesk_cache::provider::CacheManager;
use petrodesk_core::error::AppError;
use petrodesk_core::result::AppResult;
use petrodesk_core::traits::cache::CacheProvider;
use petrodesk_database::repositories::{EmployeeRepository, ProjectRepository};
use petrodesk_entity::project::model::{CreateProject, Project};

use crate::context::RequestContext;
use crate::invalidate::invalidate_project;

/// Manages projects and their assignment lists.
#[derive(Debug, Clone)]
pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    employee_repo: Arc<EmployeeRepository>,
    cache: Arc<CacheManager>,
    cache_ttl: Duration,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        project_repo: Arc<ProjectRepository>,
        employee_repo: Arc<EmployeeRepository>,
        cache: Arc<CacheManager>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            project_repo,
            employee_repo,
            cache,
            cache_ttl,
        }
    }

    /// Lists all projects, serving from cache when possible.
    pub async fn list_projects(&self, _ctx: &RequestContext) -> AppResult<Vec<Project>> {
        let key = keys::project_list();
        match self.cache.get_json::<Vec<Project>>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "Cache read failed, falling back to database"),
        }

        let projects = self.project_repo.find_all().await?;
        if let Err(e) = self.cache.set_json(&key, &projects, self.cache_ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
        Ok(projects)
    }

    /// Gets one project, serving from cache when possible.
    pub async fn get_project(&self, _ctx: &RequestContext, project_id: Uuid) -> AppResult<Project> {
        let key = keys::project_by_id(project_id);
        match self.cache.get_json::<Project>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "Cache read failed, falling back to database"),
        }

        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        if let Err(e) = self.cache.set_json(&key, &project, self.cache_ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
        Ok(project)
    }

    /// Creates a project with an empty assignment list.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        data: CreateProject,
    ) -> AppResult<Project> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Project name cannot be empty"));
        }

        let project = self.project_repo.create(&data).await?;
        invalidate_project(&self.cache, project.id).await;
        info!(project_id = %project.id, by = %ctx.user_id, "Project created");
        Ok(project)
    }

    /// Assigns an employee to a project. Assigning twice is a no-op.
    pub async fn assign_employee(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Project> {
        self.employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;

        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        if project.has_employee(employee_id) {
            return Ok(project);
        }

        let mut ids = project.employee_ids.0.clone();
        ids.push(employee_id);
        let updated = self
            .project_repo
            .set_employees(project_id, &ids)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        invalidate_project(&self.cache, project_id).await;
        info!(%project_id, %employee_id, by = %ctx.user_id, "Employee assigned to project");
        Ok(updated)
    }

    /// Removes an employee from a project's assignment list.
    pub async fn unassign_employee(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Project> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        if !project.has_employee(employee_id) {
            return Err(AppError::not_found("Employee not assigned to project"));
        }

        let ids: Vec<Uuid> = project
            .employee_ids
            .iter()
            .copied()
            .filter(|id| *id != employee_id)
            .collect();
        let updated = self
            .project_repo
            .set_employees(project_id, &ids)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        invalidate_project(&self.cache, project_id).await;
        info!(%project_id, %employee_id, by = %ctx.user_id, "Employee unassigned from project");
        Ok(updated)
    }

    /// Deletes a project and its schedule records (via cascade).
    pub async fn delete_project(&self, ctx: &RequestContext, project_id: Uuid) -> AppResult<()> {
        let deleted = self.project_repo.delete(project_id).await?;
        if !deleted {
            return Err(AppError::not_found("Project not found"));
        }
        invalidate_project(&self.cache, project_id).await;
        info!(%project_id, by = %ctx.user_id, "Project deleted");
        Ok(())
    }
}
