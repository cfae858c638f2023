use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use super::{lock_table, MemoryStore};
use crate::domain::models::qr_session::{QrSession, ScanAttempt};
use crate::storage::traits::QrSessionStorage;

/// In-memory QR session repository.
///
/// Session state transitions happen under the session table lock, so the
/// scan path's "check scanned_by, then append" cannot interleave for two
/// concurrent scans of the same session.
#[derive(Clone)]
pub struct QrSessionRepository {
    store: Arc<MemoryStore>,
}

impl QrSessionRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl QrSessionStorage for QrSessionRepository {
    fn store_session(&self, session: &QrSession) -> Result<usize> {
        let mut sessions = lock_table(&self.store.sessions, "session")?;
        let mut deactivated = 0;
        for existing in sessions.iter_mut() {
            if existing.is_active
                && existing.teacher_id == session.teacher_id
                && existing.subject_id == session.subject_id
            {
                existing.is_active = false;
                deactivated += 1;
            }
        }
        sessions.push(session.clone());
        Ok(deactivated)
    }

    fn get_session(&self, id: &str) -> Result<Option<QrSession>> {
        let sessions = lock_table(&self.store.sessions, "session")?;
        Ok(sessions.iter().find(|s| s.id == id).cloned())
    }

    fn record_scan(
        &self,
        token: &str,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ScanAttempt> {
        let mut sessions = lock_table(&self.store.sessions, "session")?;
        let session = match sessions
            .iter_mut()
            .find(|s| s.is_active && (s.code == token || s.id == token))
        {
            Some(s) => s,
            None => return Ok(ScanAttempt::NoActiveSession),
        };

        if session.has_expired(now) {
            // Lazy deactivation: expiry is only noticed when someone scans.
            session.is_active = false;
            return Ok(ScanAttempt::Expired);
        }
        if session.scanned_by.iter().any(|id| id == student_id) {
            return Ok(ScanAttempt::AlreadyScanned);
        }

        session.scanned_by.push(student_id.to_string());
        Ok(ScanAttempt::Accepted(session.clone()))
    }

    fn end_session(&self, id: &str, now: DateTime<Utc>) -> Result<Option<QrSession>> {
        let mut sessions = lock_table(&self.store.sessions, "session")?;
        Ok(sessions.iter_mut().find(|s| s.id == id).map(|session| {
            session.is_active = false;
            if session.ended_at.is_none() {
                session.ended_at = Some(now);
            }
            session.clone()
        }))
    }

    fn extend_session(&self, id: &str, additional_minutes: i64) -> Result<Option<QrSession>> {
        let mut sessions = lock_table(&self.store.sessions, "session")?;
        Ok(sessions.iter_mut().find(|s| s.id == id).map(|session| {
            session.expires_at += Duration::minutes(additional_minutes);
            // Extension reactivates even an ended or expired session.
            session.is_active = true;
            session.ended_at = None;
            session.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(teacher_id: &str, subject_id: &str, expires_at: DateTime<Utc>) -> QrSession {
        QrSession {
            id: QrSession::generate_id(),
            code: QrSession::generate_code(),
            teacher_id: teacher_id.to_string(),
            subject_id: subject_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            expires_at,
            is_active: true,
            ended_at: None,
            scanned_by: Vec::new(),
        }
    }

    #[test]
    fn test_store_deactivates_prior_session_for_pair() {
        let repo = QrSessionRepository::new(Arc::new(MemoryStore::new()));
        let later = Utc::now() + Duration::minutes(15);

        let first = session("teacher::1", "subject::1", later);
        assert_eq!(repo.store_session(&first).unwrap(), 0);

        let second = session("teacher::1", "subject::1", later);
        assert_eq!(repo.store_session(&second).unwrap(), 1);
        assert!(!repo.get_session(&first.id).unwrap().unwrap().is_active);

        // Different subject: untouched.
        let other = session("teacher::1", "subject::2", later);
        assert_eq!(repo.store_session(&other).unwrap(), 0);
        assert!(repo.get_session(&second.id).unwrap().unwrap().is_active);
    }

    #[test]
    fn test_record_scan_lazy_expiry() {
        let repo = QrSessionRepository::new(Arc::new(MemoryStore::new()));
        let expired = session("teacher::1", "subject::1", Utc::now() - Duration::minutes(1));
        repo.store_session(&expired).unwrap();

        let attempt = repo
            .record_scan(&expired.code, "student::1", Utc::now())
            .unwrap();
        assert_eq!(attempt, ScanAttempt::Expired);
        assert!(!repo.get_session(&expired.id).unwrap().unwrap().is_active);

        // Once deactivated the session no longer matches at all.
        let attempt = repo
            .record_scan(&expired.code, "student::1", Utc::now())
            .unwrap();
        assert_eq!(attempt, ScanAttempt::NoActiveSession);
    }

    #[test]
    fn test_record_scan_rejects_duplicate_student() {
        let repo = QrSessionRepository::new(Arc::new(MemoryStore::new()));
        let live = session("teacher::1", "subject::1", Utc::now() + Duration::minutes(15));
        repo.store_session(&live).unwrap();

        let first = repo.record_scan(&live.code, "student::1", Utc::now()).unwrap();
        assert!(matches!(first, ScanAttempt::Accepted(_)));

        let second = repo.record_scan(&live.code, "student::1", Utc::now()).unwrap();
        assert_eq!(second, ScanAttempt::AlreadyScanned);

        let stored = repo.get_session(&live.id).unwrap().unwrap();
        assert_eq!(stored.scanned_by, vec!["student::1".to_string()]);
    }

    #[test]
    fn test_end_is_idempotent_and_extend_reactivates() {
        let repo = QrSessionRepository::new(Arc::new(MemoryStore::new()));
        let live = session("teacher::1", "subject::1", Utc::now() + Duration::minutes(15));
        repo.store_session(&live).unwrap();

        let ended = repo.end_session(&live.id, Utc::now()).unwrap().unwrap();
        assert!(!ended.is_active);
        let ended_at = ended.ended_at;
        assert!(ended_at.is_some());

        // Second end keeps the first timestamp.
        let again = repo.end_session(&live.id, Utc::now()).unwrap().unwrap();
        assert_eq!(again.ended_at, ended_at);

        let extended = repo.extend_session(&live.id, 10).unwrap().unwrap();
        assert!(extended.is_active);
        assert!(extended.ended_at.is_none());
        assert_eq!(extended.expires_at, live.expires_at + Duration::minutes(10));
    }
}
