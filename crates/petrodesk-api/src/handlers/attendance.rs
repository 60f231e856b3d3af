//! Attendance handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use petrodesk_core::error::AppError;
use petrodesk_entity::schedule::{Attendance, CreateAttendance};

use crate::dto::request::{CreateAttendanceRequest, ScheduleQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/attendance
pub async fn record_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAttendanceRequest>,
) -> ApiResult<Json<ApiResponse<Attendance>>> {
    let attendance = state
        .schedule_service
        .record_attendance(
            &auth,
            CreateAttendance {
                project_id: req.project_id,
                employee_id: req.employee_id,
                date: req.date,
                check_in: req.check_in,
                check_out: req.check_out,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(attendance)))
}

/// GET /api/attendance?project_id=...&date=YYYY-MM-DD or ?employee_id=...
pub async fn list_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Attendance>>>> {
    let records = match (query.project_id, query.employee_id) {
        (Some(project_id), None) => {
            let date = query.date.ok_or_else(|| {
                AppError::validation("'date' is required when listing by project")
            })?;
            state
                .schedule_service
                .attendance_for_project(&auth, project_id, date)
                .await?
        }
        (None, Some(employee_id)) => {
            state
                .schedule_service
                .attendance_for_employee(&auth, employee_id)
                .await?
        }
        _ => {
            return Err(AppError::validation(
                "Exactly one of 'project_id' or 'employee_id' is required",
            )
            .into());
        }
    };
    Ok(Json(ApiResponse::ok(records)))
}

/// DELETE /api/attendance/{id}
pub async fn delete_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.schedule_service.delete_attendance(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Attendance deleted".to_string(),
    })))
}
