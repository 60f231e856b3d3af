//! Attendance and shift scheduling entities.

pub mod attendance;
pub mod hours;
pub mod shift;

pub use attendance::{Attendance, CreateAttendance};
pub use hours::total_hours;
pub use shift::{CreateShift, Shift, ShiftKind};
