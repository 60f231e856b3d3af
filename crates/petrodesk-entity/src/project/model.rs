//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// A petroleum project employees are assigned to.
///
/// The assignment list is embedded as JSONB; attendance and shift creation
/// check membership against it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Site / field location (optional).
    pub location: Option<String>,
    /// Ids of employees assigned to this project.
    pub employee_ids: Json<Vec<Uuid>>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Whether the given employee is assigned to this project.
    pub fn has_employee(&self, employee_id: Uuid) -> bool {
        self.employee_ids.iter().any(|id| *id == employee_id)
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name.
    pub name: String,
    /// Site / field location (optional).
    pub location: Option<String>,
}
