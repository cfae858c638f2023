use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alphabet for session codes. Ambiguous characters (0/O, 1/I/L) are left
/// out because students type these by hand when the camera fails.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// A time-boxed token authorizing students to self-mark attendance.
///
/// At most one session is active per (teacher_id, subject_id); creating a new
/// one deactivates prior ones for that pair. A student appears in
/// `scanned_by` at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrSession {
    pub id: String,
    pub code: String,
    pub teacher_id: String,
    pub subject_id: String,
    /// Calendar day attendance is written against
    pub date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub ended_at: Option<DateTime<Utc>>,
    pub scanned_by: Vec<String>,
}

impl QrSession {
    pub fn generate_id() -> String {
        format!("qrsession::{}", Uuid::new_v4())
    }

    /// Generate a random 6-character session code.
    pub fn generate_code() -> String {
        Uuid::new_v4()
            .as_bytes()
            .iter()
            .take(6)
            .map(|b| CODE_ALPHABET[*b as usize % CODE_ALPHABET.len()] as char)
            .collect()
    }

    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Outcome of an atomic scan attempt against the session table.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanAttempt {
    /// No active session matched the token
    NoActiveSession,
    /// The session was past its expiry; it has been deactivated
    Expired,
    /// The student already scanned this session
    AlreadyScanned,
    /// The scan was accepted and the student recorded
    Accepted(QrSession),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..50 {
            let code = QrSession::generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }
}
