//! # petrodesk-service
//!
//! Business logic service layer for PetroDesk. Each service orchestrates
//! repositories, cache, storage providers, and the event bus to implement
//! application-level use cases.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod employee;
pub mod folder;
pub mod invalidate;
pub mod project;
pub mod schedule;

pub use context::RequestContext;
pub use employee::EmployeeService;
pub use folder::FolderService;
pub use project::ProjectService;
pub use schedule::ScheduleService;
