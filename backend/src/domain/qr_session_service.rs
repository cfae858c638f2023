//! QR attendance session service.
//!
//! Lifecycle per session: created(active) -> scanned* -> ended or
//! expired(inactive) -> extended(active again, new expiry). Expiry is lazy:
//! it is only noticed (and the session deactivated) when a scan arrives past
//! expires_at. A successful scan writes a present record into the attendance
//! ledger through the same upsert path as bulk marking.

use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{info, warn};

use crate::domain::commands::qr::{GenerateSessionCommand, ScanSessionCommand, ScanSessionResult};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::domain::models::qr_session::{QrSession, ScanAttempt};
use crate::storage::memory::{
    AttendanceRepository, MemoryStore, QrSessionRepository, StudentRepository,
};
use crate::storage::traits::{AttendanceStorage, QrSessionStorage, StudentStorage};

const DEFAULT_VALID_MINUTES: i64 = 15;
const DEFAULT_EXTEND_MINUTES: i64 = 10;

#[derive(Clone)]
pub struct QrSessionService {
    session_repository: QrSessionRepository,
    student_repository: StudentRepository,
    attendance_repository: AttendanceRepository,
}

impl QrSessionService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            session_repository: QrSessionRepository::new(store.clone()),
            student_repository: StudentRepository::new(store.clone()),
            attendance_repository: AttendanceRepository::new(store),
        }
    }

    /// Create a new session for a (teacher, subject) pair.
    ///
    /// Any other active session for the same pair is deactivated in the same
    /// step, so at most one session per pair is ever live.
    pub fn generate(&self, command: GenerateSessionCommand) -> DomainResult<QrSession> {
        let valid_minutes = command.valid_minutes.unwrap_or(DEFAULT_VALID_MINUTES);
        if valid_minutes <= 0 {
            return Err(DomainError::invalid_input(
                "validMinutes must be positive",
            ));
        }

        let now = Utc::now();
        let session = QrSession {
            id: QrSession::generate_id(),
            code: QrSession::generate_code(),
            teacher_id: command.teacher_id,
            subject_id: command.subject_id,
            date: now.date_naive(),
            expires_at: now + Duration::minutes(valid_minutes),
            is_active: true,
            ended_at: None,
            scanned_by: Vec::new(),
        };

        let deactivated = self.session_repository.store_session(&session)?;
        if deactivated > 0 {
            info!(
                "Deactivated {} prior session(s) for {}/{}",
                deactivated, session.teacher_id, session.subject_id
            );
        }
        info!(
            "Generated session {} (code {}, expires {})",
            session.id, session.code, session.expires_at
        );
        Ok(session)
    }

    /// Record a student scan against an active session.
    ///
    /// On success the attendance ledger gets a present record for the
    /// session's calendar day, carrying the session id.
    pub fn scan(&self, command: ScanSessionCommand) -> DomainResult<ScanSessionResult> {
        if !self.student_repository.student_exists(&command.student_id)? {
            return Err(DomainError::not_found("student", &command.student_id));
        }

        let now = Utc::now();
        match self
            .session_repository
            .record_scan(&command.token, &command.student_id, now)?
        {
            ScanAttempt::NoActiveSession => {
                Err(DomainError::not_found("active session", &command.token))
            }
            ScanAttempt::Expired => {
                warn!("Scan against expired session token {}", command.token);
                Err(DomainError::Expired)
            }
            ScanAttempt::AlreadyScanned => Err(DomainError::AlreadyDone),
            ScanAttempt::Accepted(session) => {
                let candidate = AttendanceRecord {
                    id: AttendanceRecord::generate_id(),
                    student_id: command.student_id,
                    date: session.date,
                    status: AttendanceStatus::Present,
                    marked_at: now,
                    session_id: Some(session.id.clone()),
                };
                let record = self.attendance_repository.upsert_record(candidate)?;
                info!(
                    "Scan accepted: {} marked present via session {}",
                    record.student_id, session.id
                );
                Ok(ScanSessionResult {
                    session_id: session.id,
                    record,
                })
            }
        }
    }

    /// Deactivate a session; idempotent.
    pub fn end(&self, session_id: &str) -> DomainResult<QrSession> {
        self.session_repository
            .end_session(session_id, Utc::now())?
            .ok_or_else(|| DomainError::not_found("session", session_id))
    }

    /// Push the expiry forward and reactivate the session, even one that
    /// already ended or expired.
    pub fn extend(
        &self,
        session_id: &str,
        additional_minutes: Option<i64>,
    ) -> DomainResult<QrSession> {
        let minutes = additional_minutes.unwrap_or(DEFAULT_EXTEND_MINUTES);
        if minutes <= 0 {
            return Err(DomainError::invalid_input(
                "additionalMinutes must be positive",
            ));
        }
        self.session_repository
            .extend_session(session_id, minutes)?
            .ok_or_else(|| DomainError::not_found("session", session_id))
    }

    pub fn get_session(&self, session_id: &str) -> DomainResult<QrSession> {
        self.session_repository
            .get_session(session_id)?
            .ok_or_else(|| DomainError::not_found("session", session_id))
    }
}
