//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use petrodesk_entity::schedule::ShiftKind;

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder ID (`None` for a root folder).
    pub parent_id: Option<Uuid>,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 255))]
    pub new_name: String,
}

/// Delete document request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteDocumentRequest {
    /// URL of the document to remove.
    #[validate(length(min = 1))]
    pub url: String,
}

/// Create project request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Site / field location.
    pub location: Option<String>,
}

/// Assign or unassign an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignEmployeeRequest {
    /// The employee to (un)assign.
    pub employee_id: Uuid,
}

/// Record attendance request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttendanceRequest {
    /// The project worked on.
    pub project_id: Uuid,
    /// The employee.
    pub employee_id: Uuid,
    /// The attendance date.
    pub date: NaiveDate,
    /// Check-in time (`HH:MM`).
    pub check_in: String,
    /// Check-out time (`HH:MM`).
    pub check_out: String,
}

/// Schedule shift request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The project.
    pub project_id: Uuid,
    /// The employee.
    pub employee_id: Uuid,
    /// The shift date.
    pub date: NaiveDate,
    /// Shift start time (`HH:MM`).
    pub start_time: String,
    /// Shift end time (`HH:MM`).
    pub end_time: String,
    /// Day or night shift.
    pub kind: ShiftKind,
}

/// Query parameters for schedule listings.
///
/// Exactly one of `project_id` or `employee_id` selects the listing;
/// project listings are per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// List records for this project (requires `date`).
    pub project_id: Option<Uuid>,
    /// List records for this employee.
    pub employee_id: Option<Uuid>,
    /// The date to list project records for.
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_body_field_is_new_name() {
        let req: RenameFolderRequest =
            serde_json::from_str(r#"{"new_name":"Reports"}"#).unwrap();
        assert_eq!(req.new_name, "Reports");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rename_empty_name_rejected() {
        let req = RenameFolderRequest {
            new_name: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
