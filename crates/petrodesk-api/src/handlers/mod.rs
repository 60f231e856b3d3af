//! HTTP request handlers, one module per resource.

pub mod attendance;
pub mod document;
pub mod employee;
pub mod files;
pub mod folder;
pub mod health;
pub mod project;
pub mod shift;
