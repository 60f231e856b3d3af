//! Document upload and removal handlers.
//!
//! Uploads are restricted to an explicit MIME allow-list, checked before
//! any bytes reach the storage provider.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use petrodesk_core::error::AppError;
use petrodesk_entity::employee::document::DocumentRef;
use petrodesk_service::employee::UploadPayload;

use crate::dto::request::DeleteDocumentRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// MIME types accepted for employee documents.
pub(crate) const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "image/jpeg",
    "image/png",
    "image/gif",
];

/// POST /api/employees/{id}/folders/{folder_id}/documents (multipart)
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((employee_id, folder_id)): Path<(Uuid, Uuid)>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<DocumentRef>>> {
    let mut payload: Option<UploadPayload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("document").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data: Bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
            payload = Some(UploadPayload {
                data,
                mime_type,
                file_name,
            });
        }
    }

    let payload = payload.ok_or_else(|| AppError::validation("Missing 'file' field"))?;

    if !ALLOWED_MIME_TYPES.contains(&payload.mime_type.as_str()) {
        return Err(AppError::validation(format!(
            "File type '{}' is not allowed",
            payload.mime_type
        ))
        .into());
    }
    if payload.data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty").into());
    }

    let doc = state
        .folder_service
        .upload_document(&auth, employee_id, folder_id, payload)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// DELETE /api/employees/{id}/folders/{folder_id}/documents
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((employee_id, folder_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<DeleteDocumentRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .folder_service
        .delete_document(&auth, employee_id, folder_id, &req.url)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Document removed".to_string(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_and_image_types_allowed() {
        for mime in [
            "application/pdf",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "image/png",
        ] {
            assert!(ALLOWED_MIME_TYPES.contains(&mime), "{mime} should be allowed");
        }
    }

    #[test]
    fn test_executables_not_allowed() {
        assert!(!ALLOWED_MIME_TYPES.contains(&"application/x-msdownload"));
        assert!(!ALLOWED_MIME_TYPES.contains(&"text/html"));
    }
}
