//! Document reference value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference to a stored document, held by a folder.
///
/// Immutable once created: edits are modeled as delete + re-add. The bytes
/// themselves live in the storage provider; only the reference is embedded
/// in the employee aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Public URL of the stored object.
    pub url: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Original file name, for display.
    pub name: String,
    /// Storage-provider handle, used for deletion.
    pub storage_key: String,
    /// The user who uploaded the document.
    pub uploaded_by: Uuid,
    /// When the document was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Detected format (e.g., `pdf`, `png`).
    pub format: String,
    /// Resource classification: `image`, `raw`, or `auto`.
    pub resource_type: String,
    /// Pixel width, for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
