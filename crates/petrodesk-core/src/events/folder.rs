//! Folder tree and document domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to an employee's folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FolderEvent {
    /// A folder was created.
    Created {
        /// The owning employee.
        employee_id: Uuid,
        /// The new folder ID.
        folder_id: Uuid,
        /// Parent folder (None for a root folder).
        parent_id: Option<Uuid>,
        /// Folder name.
        name: String,
    },
    /// A folder was renamed.
    Renamed {
        /// The owning employee.
        employee_id: Uuid,
        /// The folder ID.
        folder_id: Uuid,
        /// The new name.
        new_name: String,
    },
    /// A folder and its entire subtree were deleted.
    Deleted {
        /// The owning employee.
        employee_id: Uuid,
        /// The root of the removed subtree.
        folder_id: Uuid,
        /// Number of documents referenced by the removed subtree.
        documents_removed: usize,
    },
    /// A document was attached to a folder.
    DocumentAdded {
        /// The owning employee.
        employee_id: Uuid,
        /// The folder the document landed in.
        folder_id: Uuid,
        /// The document's public URL.
        url: String,
        /// The document's display name.
        name: String,
    },
    /// A document reference was removed from a folder.
    DocumentRemoved {
        /// The owning employee.
        employee_id: Uuid,
        /// The folder the document was removed from.
        folder_id: Uuid,
        /// The document's public URL.
        url: String,
    },
}
