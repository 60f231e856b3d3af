//! Employee aggregate: profile fields, the embedded folder tree, and the
//! document references it holds.

pub mod document;
pub mod folder;
pub mod model;

pub use document::DocumentRef;
pub use folder::{Folder, FolderTree, FolderView};
pub use model::{CreateEmployee, Employee, UpdateEmployee};
