//! Folder tree handlers, nested under an employee.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use petrodesk_core::error::AppError;
use petrodesk_entity::employee::folder::FolderView;

use crate::dto::request::{CreateFolderRequest, RenameFolderRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/employees/{id}/folders
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(employee_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<FolderView>>>> {
    let tree = state.folder_service.get_tree(&auth, employee_id).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// POST /api/employees/{id}/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(employee_id): Path<Uuid>,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<Json<ApiResponse<FolderView>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(&auth, employee_id, &req.name, req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PATCH /api/employees/{id}/folders/{folder_id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((employee_id, folder_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RenameFolderRequest>,
) -> ApiResult<Json<ApiResponse<FolderView>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .rename_folder(&auth, employee_id, folder_id, &req.new_name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/employees/{id}/folders/{folder_id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((employee_id, folder_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .folder_service
        .delete_folder(&auth, employee_id, folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Folder deleted".to_string(),
    })))
}
