use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use super::{lock_table, MemoryStore};
use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::storage::traits::AttendanceStorage;

/// In-memory attendance ledger repository.
///
/// The (student_id, date) uniqueness rule is enforced here: both the bulk
/// marking path and the QR scan path go through `upsert_record`, so there is
/// exactly one place where a day can be written.
#[derive(Clone)]
pub struct AttendanceRepository {
    store: Arc<MemoryStore>,
}

impl AttendanceRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl AttendanceStorage for AttendanceRepository {
    fn upsert_record(&self, candidate: AttendanceRecord) -> Result<AttendanceRecord> {
        let mut records = lock_table(&self.store.attendance, "attendance")?;
        match records
            .iter_mut()
            .find(|r| r.student_id == candidate.student_id && r.date == candidate.date)
        {
            Some(existing) => {
                // Overwrite in place, keeping the original id.
                existing.status = candidate.status;
                existing.marked_at = candidate.marked_at;
                existing.session_id = candidate.session_id;
                Ok(existing.clone())
            }
            None => {
                records.push(candidate.clone());
                Ok(candidate)
            }
        }
    }

    fn get_record(&self, id: &str) -> Result<Option<AttendanceRecord>> {
        let records = lock_table(&self.store.attendance, "attendance")?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    fn update_status(
        &self,
        id: &str,
        status: AttendanceStatus,
        marked_at: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>> {
        let mut records = lock_table(&self.store.attendance, "attendance")?;
        Ok(records.iter_mut().find(|r| r.id == id).map(|record| {
            record.status = status;
            record.marked_at = marked_at;
            record.clone()
        }))
    }

    fn delete_record(&self, id: &str) -> Result<bool> {
        let mut records = lock_table(&self.store.attendance, "attendance")?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    fn list_records(
        &self,
        student_id: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = lock_table(&self.store.attendance, "attendance")?;
        let mut matching: Vec<AttendanceRecord> = records
            .iter()
            .filter(|r| student_id.map_or(true, |id| r.student_id == id))
            .filter(|r| from.map_or(true, |d| r.date >= d))
            .filter(|r| to.map_or(true, |d| r.date <= d))
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.date);
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_id: &str, date: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceRecord::generate_id(),
            student_id: student_id.to_string(),
            date,
            status,
            marked_at: Utc::now(),
            session_id: None,
        }
    }

    #[test]
    fn test_upsert_preserves_id_on_rewrite() {
        let repo = AttendanceRepository::new(Arc::new(MemoryStore::new()));
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let first = repo
            .upsert_record(record("student::1", day, AttendanceStatus::Absent))
            .unwrap();
        let second = repo
            .upsert_record(record("student::1", day, AttendanceStatus::Present))
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.status, AttendanceStatus::Present);
        assert_eq!(repo.list_records(None, None, None).unwrap().len(), 1);
    }

    #[test]
    fn test_list_filters_by_student_and_range() {
        let repo = AttendanceRepository::new(Arc::new(MemoryStore::new()));
        for day in 1..=5 {
            let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
            repo.upsert_record(record("student::1", date, AttendanceStatus::Present))
                .unwrap();
        }
        repo.upsert_record(record(
            "student::2",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            AttendanceStatus::Late,
        ))
        .unwrap();

        let filtered = repo
            .list_records(
                Some("student::1"),
                NaiveDate::from_ymd_opt(2024, 3, 2),
                NaiveDate::from_ymd_opt(2024, 3, 4),
            )
            .unwrap();
        assert_eq!(filtered.len(), 3);
        assert!(filtered.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_delete_missing_is_false() {
        let repo = AttendanceRepository::new(Arc::new(MemoryStore::new()));
        assert!(!repo.delete_record("attendance::nope").unwrap());
    }
}
