//! Project handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use petrodesk_core::error::AppError;
use petrodesk_entity::project::model::{CreateProject, Project};

use crate::dto::request::{AssignEmployeeRequest, CreateProjectRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = state.project_service.list_projects(&auth).await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Project>>> {
    let project = state.project_service.get_project(&auth, id).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<ApiResponse<Project>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let project = state
        .project_service
        .create_project(
            &auth,
            CreateProject {
                name: req.name,
                location: req.location,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// POST /api/projects/{id}/employees
pub async fn assign_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignEmployeeRequest>,
) -> ApiResult<Json<ApiResponse<Project>>> {
    let project = state
        .project_service
        .assign_employee(&auth, id, req.employee_id)
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}/employees/{employee_id}
pub async fn unassign_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, employee_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<Project>>> {
    let project = state
        .project_service
        .unassign_employee(&auth, id, employee_id)
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.project_service.delete_project(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Project deleted".to_string(),
    })))
}
