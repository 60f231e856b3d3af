//! Shift entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Day or night shift classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shift_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// Daytime shift.
    Day,
    /// Overnight shift.
    Night,
}

/// A scheduled shift for one employee on one project.
///
/// Unique on `(project_id, employee_id, date)` via a database constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: Uuid,
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
    /// When the shift was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to schedule a shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShift {
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
