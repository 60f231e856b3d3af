//! Employee entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::folder::FolderTree;

/// A hired employee, together with the folder tree of their records.
///
/// The folder tree is embedded in the row as JSONB; the whole struct is the
/// unit of mutation. `version` is the optimistic-concurrency token bumped on
/// every save of the tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: Uuid,
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
    /// Profile image URL (optional).
    pub profile_image_url: Option<String>,
    /// The embedded folder tree of documents.
    pub folders: Json<FolderTree>,
    /// Optimistic-concurrency version; bumped on every aggregate save.
    pub version: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data required to create a new employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployee {
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
    /// Profile image URL (optional).
    pub profile_image_url: Option<String>,
    /// Initial folder tree (e.g., a default "Documents" folder).
    pub folders: FolderTree,
}

/// Data for updating an employee's profile fields.
///
/// `None` fields are left unchanged. The folder tree is never updated through
/// this path; tree mutations go through the dedicated tree operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployee {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New position.
    pub position: Option<String>,
    /// New profile image URL.
    pub profile_image_url: Option<String>,
}
