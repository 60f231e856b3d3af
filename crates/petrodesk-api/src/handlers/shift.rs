//! Shift handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use petrodesk_core::error::AppError;
use petrodesk_entity::schedule::{CreateShift, Shift};

use crate::dto::request::{CreateShiftRequest, ScheduleQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/shifts
pub async fn schedule_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShiftRequest>,
) -> ApiResult<Json<ApiResponse<Shift>>> {
    let shift = state
        .schedule_service
        .schedule_shift(
            &auth,
            CreateShift {
                project_id: req.project_id,
                employee_id: req.employee_id,
                date: req.date,
                start_time: req.start_time,
                end_time: req.end_time,
                kind: req.kind,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(shift)))
}

/// GET /api/shifts?project_id=...&date=YYYY-MM-DD or ?employee_id=...
pub async fn list_shifts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Shift>>>> {
    let shifts = match (query.project_id, query.employee_id) {
        (Some(project_id), None) => {
            let date = query.date.ok_or_else(|| {
                AppError::validation("'date' is required when listing by project")
            })?;
            state
                .schedule_service
                .shifts_for_project(&auth, project_id, date)
                .await?
        }
        (None, Some(employee_id)) => {
            state
                .schedule_service
                .shifts_for_employee(&auth, employee_id)
                .await?
        }
        _ => {
            return Err(AppError::validation(
                "Exactly one of 'project_id' or 'employee_id' is required",
            )
            .into());
        }
    };
    Ok(Json(ApiResponse::ok(shifts)))
}

/// DELETE /api/shifts/{id}
pub async fn delete_shift(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.schedule_service.delete_shift(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Shift deleted".to_string(),
    })))
}
