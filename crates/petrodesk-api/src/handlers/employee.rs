//! Employee CRUD handlers.
//!
//! Create and update accept `multipart/form-data` so the profile image can
//! ride along with the text fields.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use bytes::Bytes;
use chrono::NaiveDate;
use uuid::Uuid;

use petrodesk_core::error::AppError;
use petrodesk_entity::employee::model::{Employee, UpdateEmployee};
use petrodesk_service::employee::{CreateEmployeeRequest, UploadPayload};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::handlers::document::ALLOWED_MIME_TYPES;
use crate::state::AppState;

/// Most documents accepted alongside employee creation.
const MAX_CREATE_DOCUMENTS: usize = 5;

/// Multipart fields shared by create and update.
#[derive(Debug, Default)]
struct EmployeeForm {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    position: Option<String>,
    hire_date: Option<NaiveDate>,
    profile_image: Option<UploadPayload>,
    documents: Vec<UploadPayload>,
}

async fn parse_employee_form(mut multipart: Multipart) -> Result<EmployeeForm, AppError> {
    let mut form = EmployeeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "profile_image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                if !mime_type.starts_with("image/") {
                    return Err(AppError::validation("Profile image must be an image"));
                }
                form.profile_image = Some(UploadPayload {
                    data,
                    mime_type,
                    file_name,
                });
            }
            "documents" => {
                if form.documents.len() >= MAX_CREATE_DOCUMENTS {
                    return Err(AppError::validation(format!(
                        "At most {MAX_CREATE_DOCUMENTS} documents can be attached"
                    )));
                }
                let file_name = field.file_name().unwrap_or("document").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
                    return Err(AppError::validation(format!(
                        "File type '{mime_type}' is not allowed"
                    )));
                }
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                form.documents.push(UploadPayload {
                    data,
                    mime_type,
                    file_name,
                });
            }
            text_field => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                match text_field {
                    "first_name" => form.first_name = Some(value),
                    "last_name" => form.last_name = Some(value),
                    "email" => form.email = Some(value),
                    "phone" => form.phone = Some(value),
                    "position" => form.position = Some(value),
                    "hire_date" => {
                        form.hire_date = Some(
                            NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                                AppError::validation("hire_date must be YYYY-MM-DD")
                            })?,
                        );
                    }
                    _ => {} // unknown fields are ignored
                }
            }
        }
    }

    Ok(form)
}

/// GET /api/employees
pub async fn list_employees(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Employee>>>> {
    let employees = state.employee_service.list_employees(&auth).await?;
    Ok(Json(ApiResponse::ok(employees)))
}

/// GET /api/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Employee>>> {
    let employee = state.employee_service.get_employee(&auth, id).await?;
    Ok(Json(ApiResponse::ok(employee)))
}

/// POST /api/employees (multipart)
pub async fn create_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<ApiResponse<Employee>>> {
    let form = parse_employee_form(multipart).await?;

    let req = CreateEmployeeRequest {
        first_name: form
            .first_name
            .ok_or_else(|| AppError::validation("first_name is required"))?,
        last_name: form
            .last_name
            .ok_or_else(|| AppError::validation("last_name is required"))?,
        email: form.email,
        phone: form.phone,
        position: form
            .position
            .ok_or_else(|| AppError::validation("position is required"))?,
        hire_date: form
            .hire_date
            .ok_or_else(|| AppError::validation("hire_date is required"))?,
        profile_image: form.profile_image,
        documents: form.documents,
    };

    let employee = state.employee_service.create_employee(&auth, req).await?;
    Ok(Json(ApiResponse::ok(employee)))
}

/// PUT /api/employees/{id} (multipart)
pub async fn update_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<Json<ApiResponse<Employee>>> {
    let form = parse_employee_form(multipart).await?;

    let data = UpdateEmployee {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
        position: form.position,
        profile_image_url: None,
    };

    let employee = state
        .employee_service
        .update_employee(&auth, id, data, form.profile_image)
        .await?;
    Ok(Json(ApiResponse::ok(employee)))
}

/// DELETE /api/employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.employee_service.delete_employee(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Employee deleted".to_string(),
    })))
}
