use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One exam result for a student in a subject.
///
/// Keyed by (student_id, subject_id, exam_type); re-recording overwrites the
/// existing entry in place, same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkRecord {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub recorded_at: DateTime<Utc>,
}

impl MarkRecord {
    pub fn generate_id() -> String {
        format!("mark::{}", Uuid::new_v4())
    }
}
