//! Attendance ledger service.
//!
//! The ledger holds at most one record per (student, date). Bulk marking is
//! an idempotent upsert: re-submitting the same batch overwrites statuses in
//! place instead of growing the table, and a bad student id fails only its
//! own entry, never the batch.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::domain::commands::attendance::{
    AttendanceEntryError, AttendanceListQuery, AttendanceSummaryQuery, AttendanceSummaryResult,
    MarkAttendanceCommand, MarkAttendanceResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::grading;
use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::storage::memory::{AttendanceRepository, MemoryStore, StudentRepository};
use crate::storage::traits::{AttendanceStorage, StudentStorage};

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repository: AttendanceRepository,
    student_repository: StudentRepository,
}

impl AttendanceService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            attendance_repository: AttendanceRepository::new(store.clone()),
            student_repository: StudentRepository::new(store),
        }
    }

    /// Bulk upsert for one calendar day.
    ///
    /// Unknown students are collected as per-entry errors; every valid entry
    /// is written regardless.
    pub fn mark_attendance(
        &self,
        command: MarkAttendanceCommand,
    ) -> DomainResult<MarkAttendanceResult> {
        info!(
            "Marking attendance for {} ({} entries)",
            command.date,
            command.entries.len()
        );

        let now = Utc::now();
        let mut records = Vec::new();
        let mut errors = Vec::new();

        for entry in command.entries {
            if !self.student_repository.student_exists(&entry.student_id)? {
                warn!("Attendance entry for unknown student {}", entry.student_id);
                errors.push(AttendanceEntryError {
                    student_id: entry.student_id,
                    error: "student not found".to_string(),
                });
                continue;
            }

            let candidate = AttendanceRecord {
                id: AttendanceRecord::generate_id(),
                student_id: entry.student_id,
                date: command.date,
                status: entry.status,
                marked_at: now,
                session_id: None,
            };
            records.push(self.attendance_repository.upsert_record(candidate)?);
        }

        Ok(MarkAttendanceResult { records, errors })
    }

    /// Overwrite the status of an existing record by id.
    pub fn update_attendance(
        &self,
        id: &str,
        status: AttendanceStatus,
    ) -> DomainResult<AttendanceRecord> {
        self.attendance_repository
            .update_status(id, status, Utc::now())?
            .ok_or_else(|| DomainError::not_found("attendance record", id))
    }

    pub fn delete_attendance(&self, id: &str) -> DomainResult<()> {
        if !self.attendance_repository.delete_record(id)? {
            return Err(DomainError::not_found("attendance record", id));
        }
        Ok(())
    }

    pub fn list_attendance(
        &self,
        query: AttendanceListQuery,
    ) -> DomainResult<Vec<AttendanceRecord>> {
        Ok(self.attendance_repository.list_records(
            query.student_id.as_deref(),
            query.from,
            query.to,
        )?)
    }

    /// Per-student counts and the late-weighted percentage over an optional
    /// date range.
    pub fn summary(&self, query: AttendanceSummaryQuery) -> DomainResult<AttendanceSummaryResult> {
        if !self.student_repository.student_exists(&query.student_id)? {
            return Err(DomainError::not_found("student", &query.student_id));
        }

        let records = self.attendance_repository.list_records(
            Some(&query.student_id),
            query.from,
            query.to,
        )?;

        let mut present = 0u32;
        let mut absent = 0u32;
        let mut late = 0u32;
        let mut leave = 0u32;
        for record in &records {
            match record.status {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Absent => absent += 1,
                AttendanceStatus::Late => late += 1,
                AttendanceStatus::Leave => leave += 1,
            }
        }

        let total_days = records.len() as u32;
        Ok(AttendanceSummaryResult {
            student_id: query.student_id,
            total_days,
            present,
            absent,
            late,
            leave,
            percentage: grading::attendance_percentage(present, late, total_days),
        })
    }
}
