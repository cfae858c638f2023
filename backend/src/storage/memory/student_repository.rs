use std::sync::Arc;

use anyhow::Result;

use super::{lock_table, MemoryStore};
use crate::domain::models::student::Student;
use crate::storage::traits::StudentStorage;

/// In-memory student repository
#[derive(Clone)]
pub struct StudentRepository {
    store: Arc<MemoryStore>,
}

impl StudentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl StudentStorage for StudentRepository {
    fn store_student(&self, student: &Student) -> Result<bool> {
        let mut students = lock_table(&self.store.students, "student")?;
        if students.iter().any(|s| s.roll_no == student.roll_no) {
            return Ok(false);
        }
        students.push(student.clone());
        Ok(true)
    }

    fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let students = lock_table(&self.store.students, "student")?;
        Ok(students.iter().find(|s| s.id == student_id).cloned())
    }

    fn student_exists(&self, student_id: &str) -> Result<bool> {
        let students = lock_table(&self.store.students, "student")?;
        Ok(students.iter().any(|s| s.id == student_id))
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        let students = lock_table(&self.store.students, "student")?;
        let mut all = students.clone();
        all.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));
        Ok(all)
    }
}
