//! Employee-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to employee records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EmployeeEvent {
    /// An employee record was created.
    Created {
        /// The employee ID.
        employee_id: Uuid,
        /// Display name for consumers that render the event.
        full_name: String,
    },
    /// An employee's profile fields were updated.
    Updated {
        /// The employee ID.
        employee_id: Uuid,
    },
    /// An employee record was deleted.
    Deleted {
        /// The employee ID.
        employee_id: Uuid,
    },
}
