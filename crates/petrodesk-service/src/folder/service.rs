//! Folder tree mutations on the employee aggregate.
//!
//! Every mutation follows the same shape: load the aggregate, mutate the
//! in-memory tree, then save it with a version compare-and-swap. A CAS
//! miss means another request won the race; the operation reloads and
//! replays, a bounded number of times, against the fresh tree. Validation
//! errors from the replay are final. After a successful save both employee
//! cache keys are dropped and an event is published.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use petrodesk_cache::provider::CacheManager;
use petrodesk_core::error::{AppError, ErrorKind};
use petrodesk_core::events::{DomainEvent, EventBus, FolderEvent};
use petrodesk_core::result::AppResult;
use petrodesk_database::repositories::EmployeeRepository;
use petrodesk_entity::employee::document::DocumentRef;
use petrodesk_entity::employee::folder::{FolderTree, FolderView};
use petrodesk_entity::employee::model::Employee;
use petrodesk_storage::DocumentUploadAdapter;

use crate::context::RequestContext;
use crate::employee::UploadPayload;
use crate::invalidate::invalidate_employee;

/// How many times a CAS miss is retried before giving up with `Conflict`.
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Manages the folder tree embedded in each employee record.
#[derive(Debug, Clone)]
pub struct FolderService {
    employee_repo: Arc<EmployeeRepository>,
    cache: Arc<CacheManager>,
    uploads: Arc<DocumentUploadAdapter>,
    events: EventBus,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        employee_repo: Arc<EmployeeRepository>,
        cache: Arc<CacheManager>,
        uploads: Arc<DocumentUploadAdapter>,
        events: EventBus,
    ) -> Self {
        Self {
            employee_repo,
            cache,
            uploads,
            events,
        }
    }

    /// Returns the employee's folder tree in nested form.
    pub async fn get_tree(
        &self,
        _ctx: &RequestContext,
        employee_id: Uuid,
    ) -> AppResult<Vec<FolderView>> {
        let employee = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;
        Ok(employee.folders.to_views())
    }

    /// Creates a folder, at the root or under a parent.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<FolderView> {
        let (employee, folder_id) = self
            .mutate_tree(employee_id, |tree| tree.insert(name, parent_id))
            .await?;

        self.events.publish(DomainEvent::Folder(FolderEvent::Created {
            employee_id,
            folder_id,
            parent_id,
            name: name.to_string(),
        }));
        info!(%employee_id, %folder_id, by = %ctx.user_id, "Folder created");

        employee
            .folders
            .view_of(folder_id)
            .ok_or_else(|| AppError::internal("Saved folder missing from tree"))
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<FolderView> {
        let (employee, ()) = self
            .mutate_tree(employee_id, |tree| tree.rename(folder_id, new_name))
            .await?;

        self.events.publish(DomainEvent::Folder(FolderEvent::Renamed {
            employee_id,
            folder_id,
            new_name: new_name.to_string(),
        }));
        info!(%employee_id, %folder_id, by = %ctx.user_id, "Folder renamed");

        employee
            .folders
            .view_of(folder_id)
            .ok_or_else(|| AppError::internal("Renamed folder missing from tree"))
    }

    /// Deletes a folder and its entire subtree.
    ///
    /// Idempotent: an absent folder id is a no-op, not an error. Stored
    /// objects referenced by the removed subtree are deleted best-effort
    /// after the tree is saved; a storage failure is logged and does not
    /// undo the removal.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
        folder_id: Uuid,
    ) -> AppResult<()> {
        let (_, removed) = self
            .mutate_tree(employee_id, |tree| Ok(tree.remove_subtree(folder_id)))
            .await?;

        for doc in &removed {
            if let Err(e) = self.uploads.delete(&doc.storage_key).await {
                warn!(storage_key = %doc.storage_key, error = %e, "Failed to delete stored document");
            }
        }

        self.events.publish(DomainEvent::Folder(FolderEvent::Deleted {
            employee_id,
            folder_id,
            documents_removed: removed.len(),
        }));
        info!(
            %employee_id, %folder_id,
            documents = removed.len(),
            by = %ctx.user_id,
            "Folder subtree deleted"
        );
        Ok(())
    }

    /// Uploads a document into a folder.
    ///
    /// The bytes are stored first; if attaching the reference then fails
    /// (folder gone, retries exhausted) the freshly stored object is
    /// deleted again so it cannot leak.
    pub async fn upload_document(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
        folder_id: Uuid,
        payload: UploadPayload,
    ) -> AppResult<DocumentRef> {
        let stored = self
            .uploads
            .upload(payload.data, &payload.mime_type, &payload.file_name)
            .await?;

        let doc = DocumentRef {
            url: stored.url,
            mime_type: payload.mime_type.clone(),
            name: payload.file_name.clone(),
            storage_key: stored.storage_key.clone(),
            uploaded_by: ctx.user_id,
            uploaded_at: Utc::now(),
            size_bytes: stored.size_bytes,
            format: stored.format,
            resource_type: stored.resource_type,
            width: stored.width,
            height: stored.height,
        };

        let attach = {
            let doc = doc.clone();
            self.mutate_tree(employee_id, move |tree| {
                tree.attach_document(folder_id, doc.clone())
            })
            .await
        };

        if let Err(e) = attach {
            if let Err(cleanup) = self.uploads.delete(&stored.storage_key).await {
                warn!(storage_key = %stored.storage_key, error = %cleanup, "Failed to clean up orphaned upload");
            }
            return Err(e);
        }

        self.events
            .publish(DomainEvent::Folder(FolderEvent::DocumentAdded {
                employee_id,
                folder_id,
                url: doc.url.clone(),
                name: doc.name.clone(),
            }));
        info!(%employee_id, %folder_id, name = %doc.name, by = %ctx.user_id, "Document uploaded");
        Ok(doc)
    }

    /// Removes a document reference from a folder and its stored bytes.
    ///
    /// The stored object is deleted best-effort; the reference is removed
    /// from the tree even when the storage provider fails.
    pub async fn delete_document(
        &self,
        ctx: &RequestContext,
        employee_id: Uuid,
        folder_id: Uuid,
        url: &str,
    ) -> AppResult<()> {
        let (_, removed) = self
            .mutate_tree(employee_id, |tree| {
                let folder = tree
                    .get(folder_id)
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
                let matching: Vec<DocumentRef> = folder
                    .documents
                    .iter()
                    .filter(|d| d.url == url)
                    .cloned()
                    .collect();
                if matching.is_empty() {
                    return Err(AppError::not_found("Document not found in folder"));
                }
                tree.detach_documents_by_url(folder_id, url)?;
                Ok(matching)
            })
            .await?;

        for doc in &removed {
            if let Err(e) = self.uploads.delete(&doc.storage_key).await {
                warn!(storage_key = %doc.storage_key, error = %e, "Failed to delete stored document");
            }
        }

        self.events
            .publish(DomainEvent::Folder(FolderEvent::DocumentRemoved {
                employee_id,
                folder_id,
                url: url.to_string(),
            }));
        info!(%employee_id, %folder_id, by = %ctx.user_id, "Document removed");
        Ok(())
    }

    /// Load-mutate-save loop with version compare-and-swap.
    ///
    /// The closure runs against a fresh copy of the tree on every attempt,
    /// so a replay after a CAS miss sees the concurrent change. Closure
    /// errors (validation, not-found) abort immediately.
    async fn mutate_tree<R>(
        &self,
        employee_id: Uuid,
        mut mutate: impl FnMut(&mut FolderTree) -> AppResult<R>,
    ) -> AppResult<(Employee, R)> {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let employee = self
                .employee_repo
                .find_by_id(employee_id)
                .await?
                .ok_or_else(|| AppError::not_found("Employee not found"))?;

            let mut tree = employee.folders.0.clone();
            let out = mutate(&mut tree)?;

            match self
                .employee_repo
                .save_tree(employee_id, &tree, employee.version)
                .await
            {
                Ok(saved) => {
                    invalidate_employee(&self.cache, employee_id).await;
                    return Ok((saved, out));
                }
                Err(e) if e.kind == ErrorKind::Conflict && attempt < MAX_SAVE_ATTEMPTS => {
                    warn!(%employee_id, attempt, "Concurrent tree change, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        unreachable!("loop returns on the final attempt")
    }
}
