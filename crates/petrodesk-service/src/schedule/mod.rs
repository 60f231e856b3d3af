//! Attendance and shift services.

pub mod service;

pub use service::ScheduleService;
