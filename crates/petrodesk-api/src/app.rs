//! Application builder — wires repositories, services, router, and state
//! into a running Axum server.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use petrodesk_cache::provider::CacheManager;
use petrodesk_core::config::AppConfig;
use petrodesk_core::error::AppError;
use petrodesk_core::events::EventBus;
use petrodesk_database::repositories::{
    AttendanceRepository, EmployeeRepository, ProjectRepository, ShiftRepository,
};
use petrodesk_service::{
    EmployeeService, FolderService, ProjectService, ScheduleService,
};
use petrodesk_storage::DocumentUploadAdapter;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the PetroDesk server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting PetroDesk server...");

    let config = Arc::new(config);
    let cache_ttl = Duration::from_secs(config.cache.default_ttl_seconds);

    // ── Infrastructure ───────────────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    tracing::info!(provider = %config.storage.provider, "Initializing storage");
    let storage = petrodesk_storage::providers::from_config(&config.storage).await?;
    let uploads = Arc::new(DocumentUploadAdapter::new(
        Arc::clone(&storage),
        config.storage.public_base_url.clone(),
    ));

    let events = EventBus::default();

    // ── Repositories ─────────────────────────────────────────────
    let employee_repo = Arc::new(EmployeeRepository::new(db_pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
    let attendance_repo = Arc::new(AttendanceRepository::new(db_pool.clone()));
    let shift_repo = Arc::new(ShiftRepository::new(db_pool.clone()));

    // ── Services ─────────────────────────────────────────────────
    let employee_service = Arc::new(EmployeeService::new(
        Arc::clone(&employee_repo),
        Arc::clone(&project_repo),
        Arc::clone(&cache),
        Arc::clone(&uploads),
        events.clone(),
        cache_ttl,
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&employee_repo),
        Arc::clone(&cache),
        Arc::clone(&uploads),
        events.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(
        Arc::clone(&project_repo),
        Arc::clone(&employee_repo),
        Arc::clone(&cache),
        cache_ttl,
    ));
    let schedule_service = Arc::new(ScheduleService::new(
        attendance_repo,
        shift_repo,
        Arc::clone(&project_repo),
        Arc::clone(&employee_repo),
        events.clone(),
    ));

    let state = AppState {
        config: Arc::clone(&config),
        db_pool,
        cache,
        storage,
        events,
        employee_service,
        folder_service,
        project_service,
        schedule_service,
    };

    // ── HTTP server ──────────────────────────────────────────────
    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("PetroDesk server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("PetroDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
