//! Repository implementations for all PetroDesk entities.

pub mod attendance;
pub mod employee;
pub mod project;
pub mod shift;

pub use attendance::AttendanceRepository;
pub use employee::EmployeeRepository;
pub use project::ProjectRepository;
pub use shift::ShiftRepository;
