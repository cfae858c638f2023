//! Leave application service.
//!
//! Approval is the one transition with a side effect: every calendar day in
//! the application's range is upserted into the attendance ledger with
//! status=leave, silently overwriting whatever status those days already
//! had. There is no guard against deciding an application twice; a repeat
//! decision overwrites the previous one and re-runs the backfill, which the
//! ledger's upsert keeps harmless.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::domain::commands::leave::{LeaveListQuery, SetLeaveStatusCommand, SubmitLeaveCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::domain::models::leave::{LeaveApplication, LeaveStatus};
use crate::storage::memory::{
    AttendanceRepository, LeaveRepository, MemoryStore, StudentRepository,
};
use crate::storage::traits::{AttendanceStorage, LeaveStorage, StudentStorage};

#[derive(Clone)]
pub struct LeaveService {
    leave_repository: LeaveRepository,
    student_repository: StudentRepository,
    attendance_repository: AttendanceRepository,
}

impl LeaveService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            leave_repository: LeaveRepository::new(store.clone()),
            student_repository: StudentRepository::new(store.clone()),
            attendance_repository: AttendanceRepository::new(store),
        }
    }

    /// Submit a pending application.
    pub fn submit(&self, command: SubmitLeaveCommand) -> DomainResult<LeaveApplication> {
        if command.start_date > command.end_date {
            return Err(DomainError::invalid_input(
                "startDate must not be after endDate",
            ));
        }
        if !self.student_repository.student_exists(&command.student_id)? {
            return Err(DomainError::not_found("student", &command.student_id));
        }

        let application = LeaveApplication {
            id: LeaveApplication::generate_id(),
            student_id: command.student_id,
            start_date: command.start_date,
            end_date: command.end_date,
            days: LeaveApplication::day_count(command.start_date, command.end_date),
            reason: command.reason,
            leave_type: command.leave_type,
            status: LeaveStatus::Pending,
            approved_by: None,
            rejection_reason: None,
        };
        self.leave_repository.store_application(&application)?;

        info!(
            "Leave application {} submitted for {} ({} day(s))",
            application.id, application.student_id, application.days
        );
        Ok(application)
    }

    /// Decide an application; approval back-fills the attendance ledger.
    pub fn set_status(&self, command: SetLeaveStatusCommand) -> DomainResult<LeaveApplication> {
        let mut application = self
            .leave_repository
            .get_application(&command.id)?
            .ok_or_else(|| DomainError::not_found("leave application", &command.id))?;

        match command.status {
            LeaveStatus::Approved => {
                application.status = LeaveStatus::Approved;
                application.approved_by = Some(command.approver_id);
                application.rejection_reason = None;
            }
            LeaveStatus::Rejected => {
                application.status = LeaveStatus::Rejected;
                application.approved_by = Some(command.approver_id);
                application.rejection_reason = command.rejection_reason;
            }
            LeaveStatus::Pending => {
                return Err(DomainError::invalid_input(
                    "status must be approved or rejected",
                ));
            }
        }

        if !self.leave_repository.update_application(&application)? {
            return Err(DomainError::not_found("leave application", &command.id));
        }

        if application.status == LeaveStatus::Approved {
            let written = self.backfill_attendance(&application)?;
            info!(
                "Approved leave {}: back-filled {} attendance day(s)",
                application.id, written
            );
        } else {
            info!("Rejected leave {}", application.id);
        }

        Ok(application)
    }

    pub fn get_application(&self, id: &str) -> DomainResult<LeaveApplication> {
        self.leave_repository
            .get_application(id)?
            .ok_or_else(|| DomainError::not_found("leave application", id))
    }

    pub fn list_applications(&self, query: LeaveListQuery) -> DomainResult<Vec<LeaveApplication>> {
        Ok(self
            .leave_repository
            .list_applications(query.student_id.as_deref(), query.status)?)
    }

    /// Upsert status=leave for every day in the approved range.
    fn backfill_attendance(&self, application: &LeaveApplication) -> DomainResult<u32> {
        let now = Utc::now();
        let mut written = 0;
        let mut day = application.start_date;
        loop {
            let candidate = AttendanceRecord {
                id: AttendanceRecord::generate_id(),
                student_id: application.student_id.clone(),
                date: day,
                status: AttendanceStatus::Leave,
                marked_at: now,
                session_id: None,
            };
            self.attendance_repository.upsert_record(candidate)?;
            written += 1;

            if day == application.end_date {
                break;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        Ok(written)
    }
}
