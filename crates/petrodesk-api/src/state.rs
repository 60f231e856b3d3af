//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use petrodesk_cache::provider::CacheManager;
use petrodesk_core::config::AppConfig;
use petrodesk_core::events::EventBus;
use petrodesk_core::traits::storage::StorageProvider;
use petrodesk_service::{
    EmployeeService, FolderService, ProjectService, ScheduleService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Storage provider backing document bytes.
    pub storage: Arc<dyn StorageProvider>,
    /// Domain event bus.
    pub events: EventBus,

    /// Employee service.
    pub employee_service: Arc<EmployeeService>,
    /// Folder tree service.
    pub folder_service: Arc<FolderService>,
    /// Project service.
    pub project_service: Arc<ProjectService>,
    /// Schedule service.
    pub schedule_service: Arc<ScheduleService>,
}
