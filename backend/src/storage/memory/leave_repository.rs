use std::sync::Arc;

use anyhow::Result;

use super::{lock_table, MemoryStore};
use crate::domain::models::leave::{LeaveApplication, LeaveStatus};
use crate::storage::traits::LeaveStorage;

/// In-memory leave application repository
#[derive(Clone)]
pub struct LeaveRepository {
    store: Arc<MemoryStore>,
}

impl LeaveRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl LeaveStorage for LeaveRepository {
    fn store_application(&self, application: &LeaveApplication) -> Result<()> {
        let mut leaves = lock_table(&self.store.leaves, "leave")?;
        leaves.push(application.clone());
        Ok(())
    }

    fn get_application(&self, id: &str) -> Result<Option<LeaveApplication>> {
        let leaves = lock_table(&self.store.leaves, "leave")?;
        Ok(leaves.iter().find(|l| l.id == id).cloned())
    }

    fn update_application(&self, application: &LeaveApplication) -> Result<bool> {
        let mut leaves = lock_table(&self.store.leaves, "leave")?;
        match leaves.iter_mut().find(|l| l.id == application.id) {
            Some(existing) => {
                *existing = application.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_applications(
        &self,
        student_id: Option<&str>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveApplication>> {
        let leaves = lock_table(&self.store.leaves, "leave")?;
        let mut matching: Vec<LeaveApplication> = leaves
            .iter()
            .filter(|l| student_id.map_or(true, |id| l.student_id == id))
            .filter(|l| status.map_or(true, |s| l.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(matching)
    }
}
