//! Employee CRUD with cache-aside reads.
//!
//! Reads consult the cache first and fall back to the database on a miss or
//! a cache error; a cache failure must degrade to a slower read, never to a
//! request failure. Every mutation drops both the entity and list keys.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use petrodesk_cache::keys;
use petrodesk_cache::provider::CacheManager;
use petrodesk_core::error::AppError;
use petrodesk_core::events::{DomainEvent, EmployeeEvent, EventBus};
use petrodesk_core::result::AppResult;
use petrodesk_core::traits::cache::CacheProvider;
use petrodesk_database::repositories::{EmployeeRepository, ProjectRepository};
use petrodesk_entity::employee::document::DocumentRef;
use petrodesk_entity::employee::folder::FolderTree;
use petrodesk_entity::employee::model::{CreateEmployee, Employee, UpdateEmployee};
use petrodesk_storage::DocumentUploadAdapter;

use crate::context::RequestContext;
use crate::invalidate::invalidate_employee;

/// Name of the folder every new employee starts with.
const DEFAULT_FOLDER_NAME: &str = "Documents";

/// An uploaded file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Raw file bytes.
    pub data: Bytes,
    /// Declared MIME type.
    pub mime_type: String,
    /// Original file name.
    pub file_name: String,
}

/// Request to create a new employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Job position / title.
    pub position: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Optional profile image file.
    pub profile_image: Option<UploadPayload>,
    /// Initial documents, placed in the default folder.
    pub documents: Vec<UploadPayload>,
}

/// Manages employee records and their cached projections.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    employee_repo: Arc<EmployeeRepository>,
    project_repo: Arc<ProjectRepository>,
    cache: Arc<CacheManager>,
    uploads: Arc<DocumentUploadAdapter>,
    events: EventBus,
    cache_ttl: Duration,
}

impl EmployeeService {
    /// Creates a new employee service.
    pub fn new(
        employee_repo: Arc<EmployeeRepository>,
        project_repo: Arc<ProjectRepository>,
        cache: Arc<CacheManager>,
        uploads: Arc<DocumentUploadAdapter>,
        events: EventBus,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            employee_repo,
            project_repo,
            cache,
            uploads,
            events,
            cache_ttl,
        }
    }

    /// Lists all employees, serving from cache when possible.
    pub async fn list_employees(&self, _ctx: &RequestContext) -> AppResult<Vec<Employee>> {
        let key = keys::employee_list();
        match self.cache.get_json::<Vec<Employee>>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "Cache read failed, falling back to database"),
        }

        let employees = self.employee_repo.find_all().await?;
        if let Err(e) = self.cache.set_json(&key, &employees, self.cache_ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
        Ok(employees)
    }

    /// Gets one employee aggregate, serving from cache when possible.
    pub async fn get_employee(
        &self,
        _ctx: &RequestContext,
        employee_id: Uuid,
    ) -> AppResult<Employee> {
        let key = keys::employee_by_id(employee_id);
        match self.cache.get_json::<Employee>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "Cache read failed, falling back to database"),
        }

        let employee = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;

        if let Err(e) = self.cache.set_json(&key, &employee, self.cache_ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
        Ok(employee)
    }

    /// Creates an employee with a default folder and an optional profile image.
    pub async fn create_employee(
        &self,
        ctx: &RequestContext,
        req: CreateEmployeeRequest,
    ) -> AppResult<Employee> {
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return Err(AppError::validation("Employee name cannot be empty"));
        }
        if req.position.trim().is_empty() {
            return Err(AppError::validation("Position cannot be empty"));
        }

        let profile_image_url = match req.profile_image {
            Some(image) => {
                let stored = self
                    .uploads
                    .upload(image.data, &image.mime_type, &image.file_name)
                    .await?;
                Some(stored.url)
            }
            None => None,
        };

        let mut folders = FolderTree::new();
        let default_folder = folders.insert(DEFAULT_FOLDER_NAME, None)?;
        for file in req.documents {
            let stored = self
                .uploads
                .upload(file.data, &file.mime_type, &file.file_name)
                .await?;
            folders.attach_document(
                default_folder,
                DocumentRef {
                    url: stored.url,
                    mime_type: file.mime_type,
                    name: file.file_name,
                    storage_key: stored.storage_key,
                    uploaded_by: ctx.user_id,
                    uploaded_at: Utc::now(),
                    size_bytes: stored.size_bytes,
                    format: stored.format,
                    resource_type: stored.resource_type,
                    width: stored.width,
                    height: stored.height,
                },
            )?;
        }

        let employee = self
            .employee_repo
            .create(&CreateEmployee {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                position: req.position,
                hire_date: req.hire_date,
                profile_image_url,
                folders,
            })
            .await?;

        invalidate_employee(&self.cache, employee.id).await;
        self.events
            .publish(DomainEvent::Employee(EmployeeEvent::Created {
                employee_id: employee.id,
                full_name: employee.full_name(),
            }));
        info!(employee_id = %employee.id, by = %ctx.user_id, "Employee created");
        Ok(employee)
    }

    /// Updates profile fields and optionally replaces the profile image.
    pub async fn update_employee(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
        mut data: UpdateEmployee,
        profile_image: Option<UploadPayload>,
    ) -> AppResult<Employee> {
        if let Some(image) = profile_image {
            let stored = self
                .uploads
                .upload(image.data, &image.mime_type, &image.file_name)
                .await?;
            data.profile_image_url = Some(stored.url);
        }

        let employee = self
            .employee_repo
            .update(employee_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;

        invalidate_employee(&self.cache, employee_id).await;
        self.events
            .publish(DomainEvent::Employee(EmployeeEvent::Updated { employee_id }));
        info!(%employee_id, by = %ctx.user_id, "Employee updated");
        Ok(employee)
    }

    /// Deletes an employee, their stored documents, and their assignments.
    ///
    /// Stored objects are removed best-effort: a storage failure is logged
    /// and the record is deleted regardless, so the aggregate never outlives
    /// the request over an unreachable bucket.
    pub async fn delete_employee(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
    ) -> AppResult<()> {
        let employee = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;

        for doc in employee.folders.all_documents() {
            if let Err(e) = self.uploads.delete(&doc.storage_key).await {
                warn!(storage_key = %doc.storage_key, error = %e, "Failed to delete stored document");
            }
        }

        self.employee_repo.delete(employee_id).await?;
        let touched = self.project_repo.unassign_everywhere(employee_id).await?;
        if !touched.is_empty() {
            info!(%employee_id, projects = touched.len(), "Removed deleted employee from projects");
        }
        for project_id in touched {
            crate::invalidate::invalidate_project(&self.cache, project_id).await;
        }

        invalidate_employee(&self.cache, employee_id).await;
        self.events
            .publish(DomainEvent::Employee(EmployeeEvent::Deleted { employee_id }));
        info!(%employee_id, by = %ctx.user_id, "Employee deleted");
        Ok(())
    }
}
