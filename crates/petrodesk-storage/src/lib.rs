//! # petrodesk-storage
//!
//! Object storage backends (local filesystem and S3) plus the document
//! upload adapter that turns raw bytes into normalized stored-object
//! references.

pub mod providers;
pub mod upload;

pub use upload::{DocumentUploadAdapter, StoredObject};
