use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model for a registered student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub roll_no: String,
    pub name: String,
    pub email: String,
    pub semester: u32,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Generate a unique ID for a student
    pub fn generate_id() -> String {
        format!("student::{}", Uuid::new_v4())
    }
}
