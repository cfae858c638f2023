use std::sync::Arc;

use anyhow::Result;

use super::{lock_table, MemoryStore};
use crate::domain::models::mark::MarkRecord;
use crate::storage::traits::MarkStorage;

/// In-memory mark record repository
#[derive(Clone)]
pub struct MarkRepository {
    store: Arc<MemoryStore>,
}

impl MarkRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl MarkStorage for MarkRepository {
    fn upsert_mark(&self, candidate: MarkRecord) -> Result<MarkRecord> {
        let mut marks = lock_table(&self.store.marks, "mark")?;
        match marks.iter_mut().find(|m| {
            m.student_id == candidate.student_id
                && m.subject_id == candidate.subject_id
                && m.exam_type == candidate.exam_type
        }) {
            Some(existing) => {
                existing.marks_obtained = candidate.marks_obtained;
                existing.max_marks = candidate.max_marks;
                existing.recorded_at = candidate.recorded_at;
                Ok(existing.clone())
            }
            None => {
                marks.push(candidate.clone());
                Ok(candidate)
            }
        }
    }

    fn list_marks_for_student(&self, student_id: &str) -> Result<Vec<MarkRecord>> {
        let marks = lock_table(&self.store.marks, "mark")?;
        Ok(marks
            .iter()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mark(student_id: &str, subject_id: &str, exam_type: &str, obtained: f64) -> MarkRecord {
        MarkRecord {
            id: MarkRecord::generate_id(),
            student_id: student_id.to_string(),
            subject_id: subject_id.to_string(),
            exam_type: exam_type.to_string(),
            marks_obtained: obtained,
            max_marks: 100.0,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_overwrites_same_exam() {
        let repo = MarkRepository::new(Arc::new(MemoryStore::new()));
        let first = repo
            .upsert_mark(mark("student::1", "subject::1", "midterm", 60.0))
            .unwrap();
        let second = repo
            .upsert_mark(mark("student::1", "subject::1", "midterm", 75.0))
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.marks_obtained, 75.0);
        assert_eq!(repo.list_marks_for_student("student::1").unwrap().len(), 1);
    }

    #[test]
    fn test_different_exam_types_are_separate_rows() {
        let repo = MarkRepository::new(Arc::new(MemoryStore::new()));
        repo.upsert_mark(mark("student::1", "subject::1", "midterm", 60.0))
            .unwrap();
        repo.upsert_mark(mark("student::1", "subject::1", "final", 80.0))
            .unwrap();
        assert_eq!(repo.list_marks_for_student("student::1").unwrap().len(), 2);
    }
}
