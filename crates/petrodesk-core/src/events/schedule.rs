//! Attendance and shift domain events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduleEvent {
    /// An attendance record was created.
    AttendanceRecorded {
        /// The attendance record ID.
        attendance_id: Uuid,
        /// The project.
        project_id: Uuid,
        /// The employee.
        employee_id: Uuid,
        /// The attendance date.
        date: NaiveDate,
        /// Computed total hours for the day.
        total_hours: f64,
    },
    /// An attendance record was deleted.
    AttendanceDeleted {
        /// The attendance record ID.
        attendance_id: Uuid,
    },
    /// A shift was scheduled.
    ShiftRecorded {
        /// The shift ID.
        shift_id: Uuid,
        /// The project.
        project_id: Uuid,
        /// The employee.
        employee_id: Uuid,
        /// The shift date.
        date: NaiveDate,
    },
    /// A shift was deleted.
    ShiftDeleted {
        /// The shift ID.
        shift_id: Uuid,
    },
}
