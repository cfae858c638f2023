//! Marks service.
//!
//! Exam results keyed on (student, subject, exam type), with the percentage
//! and grade math delegated to the `grading` module.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::domain::commands::marks::{RecordMarkCommand, StudentMarksSummary};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::grading;
use crate::domain::models::mark::MarkRecord;
use crate::storage::memory::{MarkRepository, MemoryStore, StudentRepository};
use crate::storage::traits::{MarkStorage, StudentStorage};

#[derive(Clone)]
pub struct MarksService {
    mark_repository: MarkRepository,
    student_repository: StudentRepository,
}

impl MarksService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            mark_repository: MarkRepository::new(store.clone()),
            student_repository: StudentRepository::new(store),
        }
    }

    /// Record one exam result; re-recording the same exam overwrites it.
    pub fn record_mark(&self, command: RecordMarkCommand) -> DomainResult<MarkRecord> {
        if command.max_marks <= 0.0 {
            return Err(DomainError::invalid_input("maxMarks must be positive"));
        }
        if command.marks_obtained < 0.0 || command.marks_obtained > command.max_marks {
            return Err(DomainError::invalid_input(
                "marksObtained must be between 0 and maxMarks",
            ));
        }
        if !self.student_repository.student_exists(&command.student_id)? {
            return Err(DomainError::not_found("student", &command.student_id));
        }

        let candidate = MarkRecord {
            id: MarkRecord::generate_id(),
            student_id: command.student_id,
            subject_id: command.subject_id,
            exam_type: command.exam_type,
            marks_obtained: command.marks_obtained,
            max_marks: command.max_marks,
            recorded_at: Utc::now(),
        };
        let record = self.mark_repository.upsert_mark(candidate)?;
        info!(
            "Recorded {} {} for {}: {}/{}",
            record.subject_id,
            record.exam_type,
            record.student_id,
            record.marks_obtained,
            record.max_marks
        );
        Ok(record)
    }

    /// Totals, percentage and letter grade across all of a student's marks.
    pub fn student_summary(&self, student_id: &str) -> DomainResult<StudentMarksSummary> {
        if !self.student_repository.student_exists(student_id)? {
            return Err(DomainError::not_found("student", student_id));
        }

        let marks = self.mark_repository.list_marks_for_student(student_id)?;
        let total_obtained: f64 = marks.iter().map(|m| m.marks_obtained).sum();
        let total_max: f64 = marks.iter().map(|m| m.max_marks).sum();
        let percentage = grading::percentage(total_obtained, total_max);

        Ok(StudentMarksSummary {
            student_id: student_id.to_string(),
            marks,
            total_obtained,
            total_max,
            percentage,
            grade: grading::grade_for_percentage(percentage).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::TestHelper;

    fn create_test_service() -> (MarksService, TestHelper) {
        let helper = TestHelper::new();
        let service = MarksService::new(helper.store.clone());
        (service, helper)
    }

    fn command(student_id: &str, subject: &str, exam: &str, obtained: f64) -> RecordMarkCommand {
        RecordMarkCommand {
            student_id: student_id.to_string(),
            subject_id: subject.to_string(),
            exam_type: exam.to_string(),
            marks_obtained: obtained,
            max_marks: 100.0,
        }
    }

    #[test]
    fn test_rerecording_overwrites_same_exam() {
        let (service, helper) = create_test_service();
        let student = helper.create_test_student("CS-101").unwrap();

        let first = service
            .record_mark(command(&student.id, "algo", "midterm", 55.0))
            .unwrap();
        let second = service
            .record_mark(command(&student.id, "algo", "midterm", 72.0))
            .unwrap();
        assert_eq!(second.id, first.id);

        let summary = service.student_summary(&student.id).unwrap();
        assert_eq!(summary.marks.len(), 1);
        assert_eq!(summary.total_obtained, 72.0);
    }

    #[test]
    fn test_bounds_validation() {
        let (service, helper) = create_test_service();
        let student = helper.create_test_student("CS-101").unwrap();

        let err = service
            .record_mark(RecordMarkCommand {
                max_marks: 0.0,
                ..command(&student.id, "algo", "midterm", 0.0)
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = service
            .record_mark(command(&student.id, "algo", "midterm", 110.0))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_summary_totals_and_grade() {
        let (service, helper) = create_test_service();
        let student = helper.create_test_student("CS-101").unwrap();
        service
            .record_mark(command(&student.id, "algo", "midterm", 90.0))
            .unwrap();
        service
            .record_mark(command(&student.id, "db", "midterm", 70.0))
            .unwrap();

        let summary = service.student_summary(&student.id).unwrap();
        assert_eq!(summary.total_obtained, 160.0);
        assert_eq!(summary.total_max, 200.0);
        assert_eq!(summary.percentage, 80.0);
        assert_eq!(summary.grade, "A");
    }

    #[test]
    fn test_summary_with_no_marks() {
        let (service, helper) = create_test_service();
        let student = helper.create_test_student("CS-101").unwrap();
        let summary = service.student_summary(&student.id).unwrap();
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.grade, "F");
    }

    #[test]
    fn test_unknown_student() {
        let (service, _helper) = create_test_service();
        let err = service.student_summary("student::ghost").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
