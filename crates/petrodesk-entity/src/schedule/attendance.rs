//! Attendance entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A daily attendance record for one employee on one project.
///
/// Unique on `(project_id, employee_id, date)` via a database constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    /// Unique record identifier.
    pub id: Uuid,
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
    /// Hours worked, derived from check-in/out with overnight wraparound.
    pub total_hours: f64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to record attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttendance {
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
