//! # petrodesk-core
//!
//! Core crate for PetroDesk. Contains traits, configuration schemas,
//! domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PetroDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
