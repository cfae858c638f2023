//! In-memory storage backend.
//!
//! The whole store lives in one process: a [`MemoryStore`] owns one
//! `Mutex`-guarded table per collection, repositories take an
//! `Arc<MemoryStore>` and implement the traits in `storage::traits`.
//! Nothing is persisted; a restart resets the store to the bundled seed
//! data.
//!
//! Each repository runs its check-then-act sequences entirely under the
//! owning table's lock, which makes operations on a single logical entity
//! (one attendance day, one fee record, one session) linearizable. There is
//! no ordering guarantee across different tables.

pub mod attendance_repository;
pub mod fee_repository;
pub mod leave_repository;
pub mod mark_repository;
pub mod qr_session_repository;
pub mod seed;
pub mod student_repository;
pub mod test_utils;

pub use attendance_repository::AttendanceRepository;
pub use fee_repository::FeeRepository;
pub use leave_repository::LeaveRepository;
pub use mark_repository::MarkRepository;
pub use qr_session_repository::QrSessionRepository;
pub use student_repository::StudentRepository;

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};

use crate::domain::models::attendance::AttendanceRecord;
use crate::domain::models::fee::FeeRecord;
use crate::domain::models::leave::LeaveApplication;
use crate::domain::models::mark::MarkRecord;
use crate::domain::models::qr_session::QrSession;
use crate::domain::models::student::Student;

/// The process-wide collection tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) students: Mutex<Vec<Student>>,
    pub(crate) attendance: Mutex<Vec<AttendanceRecord>>,
    pub(crate) sessions: Mutex<Vec<QrSession>>,
    pub(crate) fees: Mutex<Vec<FeeRecord>>,
    pub(crate) leaves: Mutex<Vec<LeaveApplication>>,
    pub(crate) marks: Mutex<Vec<MarkRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Acquire a table lock, mapping poisoning to a storage error instead of
/// panicking in a request handler.
pub(crate) fn lock_table<'a, T>(
    table: &'a Mutex<Vec<T>>,
    name: &'static str,
) -> Result<MutexGuard<'a, Vec<T>>> {
    table
        .lock()
        .map_err(|_| anyhow!("{} table lock poisoned", name))
}
