//! Employee aggregate services.

pub mod service;

pub use service::{CreateEmployeeRequest, EmployeeService, UploadPayload};
