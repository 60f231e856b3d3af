//! Route definitions for the PetroDesk HTTP API.
//!
//! All REST routes are organized by domain and mounted under `/api`;
//! stored objects are served under `/files`. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(employee_routes())
        .merge(folder_routes())
        .merge(project_routes())
        .merge(schedule_routes())
        .merge(health_routes());

    let file_routes = Router::new().route("/files/{*key}", get(handlers::files::serve_file));

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(file_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Employee CRUD.
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(handlers::employee::list_employees))
        .route("/employees", post(handlers::employee::create_employee))
        .route("/employees/{id}", get(handlers::employee::get_employee))
        .route("/employees/{id}", put(handlers::employee::update_employee))
        .route(
            "/employees/{id}",
            delete(handlers::employee::delete_employee),
        )
}

/// Folder tree and document routes, nested under an employee.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/employees/{id}/folders", get(handlers::folder::get_tree))
        .route(
            "/employees/{id}/folders",
            post(handlers::folder::create_folder),
        )
        .route(
            "/employees/{id}/folders/{folder_id}",
            patch(handlers::folder::rename_folder),
        )
        .route(
            "/employees/{id}/folders/{folder_id}",
            delete(handlers::folder::delete_folder),
        )
        .route(
            "/employees/{id}/folders/{folder_id}/documents",
            post(handlers::document::upload_document),
        )
        .route(
            "/employees/{id}/folders/{folder_id}/documents",
            delete(handlers::document::delete_document),
        )
}

/// Project CRUD and assignment.
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::project::list_projects))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{id}", get(handlers::project::get_project))
        .route("/projects/{id}", delete(handlers::project::delete_project))
        .route(
            "/projects/{id}/employees",
            post(handlers::project::assign_employee),
        )
        .route(
            "/projects/{id}/employees/{employee_id}",
            delete(handlers::project::unassign_employee),
        )
}

/// Attendance and shift routes.
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/attendance",
            get(handlers::attendance::list_attendance)
                .post(handlers::attendance::record_attendance),
        )
        .route(
            "/attendance/{id}",
            delete(handlers::attendance::delete_attendance),
        )
        .route(
            "/shifts",
            get(handlers::shift::list_shifts).post(handlers::shift::schedule_shift),
        )
        .route("/shifts/{id}", delete(handlers::shift::delete_shift))
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
