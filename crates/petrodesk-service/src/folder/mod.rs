//! Folder tree and document services.

pub mod service;

pub use service::FolderService;
