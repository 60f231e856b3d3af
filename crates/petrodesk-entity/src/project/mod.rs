//! Project entity.

pub mod model;

pub use model::{CreateProject, Project};
