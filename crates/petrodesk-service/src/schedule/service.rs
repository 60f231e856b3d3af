//! Attendance and shift recording.
//!
//! Both record kinds are validated the same way: the project and employee
//! must exist, the employee must be assigned to the project, and the times
//! must parse as `HH:MM`. Same-day duplicates are rejected by the database
//! unique constraint and surface as `Conflict`.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use petrodesk_core::error::AppError;
use petrodesk_core::events::{DomainEvent, EventBus, ScheduleEvent};
use petrodesk_core::result::AppResult;
use petrodesk_database::repositories::{
    AttendanceRepository, EmployeeRepository, ProjectRepository, ShiftRepository,
};
use petrodesk_entity::schedule::{
    Attendance, CreateAttendance, CreateShift, Shift, total_hours,
};

use crate::context::RequestContext;

/// Manages attendance records and shift schedules.
#[derive(Debug, Clone)]
pub struct ScheduleService {
    attendance_repo: Arc<AttendanceRepository>,
    shift_repo: Arc<ShiftRepository>,
    project_repo: Arc<ProjectRepository>,
    employee_repo: Arc<EmployeeRepository>,
    events: EventBus,
}

impl ScheduleService {
    /// Creates a new schedule service.
    pub fn new(
        attendance_repo: Arc<AttendanceRepository>,
        shift_repo: Arc<ShiftRepository>,
        project_repo: Arc<ProjectRepository>,
        employee_repo: Arc<EmployeeRepository>,
        events: EventBus,
    ) -> Self {
        Self {
            attendance_repo,
            shift_repo,
            project_repo,
            employee_repo,
            events,
        }
    }

    /// Records daily attendance, deriving the hour total from the times.
    pub async fn record_attendance(
        &self,
        ctx: &RequestContext,
        data: CreateAttendance,
    ) -> AppResult<Attendance> {
        self.require_assignment(data.project_id, data.employee_id)
            .await?;
        let hours = total_hours(&data.check_in, &data.check_out)?;

        let attendance = self
            .attendance_repo
            .create(
                data.project_id,
                data.employee_id,
                data.date,
                &data.check_in,
                &data.check_out,
                hours,
            )
            .await?;

        self.events
            .publish(DomainEvent::Schedule(ScheduleEvent::AttendanceRecorded {
                attendance_id: attendance.id,
                project_id: attendance.project_id,
                employee_id: attendance.employee_id,
                date: attendance.date,
                total_hours: attendance.total_hours,
            }));
        info!(
            attendance_id = %attendance.id,
            hours = attendance.total_hours,
            by = %ctx.user_id,
            "Attendance recorded"
        );
        Ok(attendance)
    }

    /// Lists a project's attendance for one date.
    pub async fn attendance_for_project(
        &self,
        _ctx: &RequestContext,
        project_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Attendance>> {
        self.attendance_repo
            .find_by_project_and_date(project_id, date)
            .await
    }

    /// Lists one employee's attendance history.
    pub async fn attendance_for_employee(
        &self,
        _ctx: &RequestContext,
        employee_id: Uuid,
    ) -> AppResult<Vec<Attendance>> {
        self.attendance_repo.find_by_employee(employee_id).await
    }

    /// Deletes an attendance record.
    pub async fn delete_attendance(
        &self,
        ctx: &RequestContext,
        attendance_id: Uuid,
    ) -> AppResult<()> {
        let deleted = self.attendance_repo.delete(attendance_id).await?;
        if !deleted {
            return Err(AppError::not_found("Attendance record not found"));
        }
        self.events
            .publish(DomainEvent::Schedule(ScheduleEvent::AttendanceDeleted {
                attendance_id,
            }));
        info!(%attendance_id, by = %ctx.user_id, "Attendance deleted");
        Ok(())
    }

    /// Schedules a shift.
    pub async fn schedule_shift(
        &self,
        ctx: &RequestContext,
        data: CreateShift,
    ) -> AppResult<Shift> {
        self.require_assignment(data.project_id, data.employee_id)
            .await?;
        // Validates both times parse as HH:MM; the span itself is not stored.
        total_hours(&data.start_time, &data.end_time)?;

        let shift = self.shift_repo.create(&data).await?;

        self.events
            .publish(DomainEvent::Schedule(ScheduleEvent::ShiftRecorded {
                shift_id: shift.id,
                project_id: shift.project_id,
                employee_id: shift.employee_id,
                date: shift.date,
            }));
        info!(shift_id = %shift.id, by = %ctx.user_id, "Shift scheduled");
        Ok(shift)
    }

    /// Lists a project's shifts for one date.
    pub async fn shifts_for_project(
        &self,
        _ctx: &RequestContext,
        project_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Shift>> {
        self.shift_repo
            .find_by_project_and_date(project_id, date)
            .await
    }

    /// Lists one employee's shifts.
    pub async fn shifts_for_employee(
        &self,
        _ctx: &RequestContext,
        employee_id: Uuid,
    ) -> AppResult<Vec<Shift>> {
        self.shift_repo.find_by_employee(employee_id).await
    }

    /// Deletes a shift.
    pub async fn delete_shift(&self, ctx: &RequestContext, shift_id: Uuid) -> AppResult<()> {
        let deleted = self.shift_repo.delete(shift_id).await?;
        if !deleted {
            return Err(AppError::not_found("Shift not found"));
        }
        self.events
            .publish(DomainEvent::Schedule(ScheduleEvent::ShiftDeleted { shift_id }));
        info!(%shift_id, by = %ctx.user_id, "Shift deleted");
        Ok(())
    }

    /// Checks the project exists and the employee is assigned to it.
    async fn require_assignment(&self, project_id: Uuid, employee_id: Uuid) -> AppResult<()> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        self.employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;

        if !project.has_employee(employee_id) {
            return Err(AppError::validation(
                "Employee is not assigned to this project",
            ));
        }
        Ok(())
    }
}
