use std::sync::Arc;

use anyhow::Result;

use super::{lock_table, MemoryStore};
use crate::domain::models::fee::{FeePayment, FeeRecord, FeeStatus, PaymentOutcome};
use crate::storage::traits::FeeStorage;

/// In-memory fee ledger repository.
///
/// `apply_payment` re-reads the balance and writes the new amounts under the
/// fee table lock, so concurrent payments against the same record serialize
/// and can never push paid_amount past total_amount.
#[derive(Clone)]
pub struct FeeRepository {
    store: Arc<MemoryStore>,
}

impl FeeRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl FeeStorage for FeeRepository {
    fn store_record(&self, record: &FeeRecord) -> Result<bool> {
        let mut fees = lock_table(&self.store.fees, "fee")?;
        if fees
            .iter()
            .any(|r| r.student_id == record.student_id && r.semester_id == record.semester_id)
        {
            return Ok(false);
        }
        fees.push(record.clone());
        Ok(true)
    }

    fn get_record(&self, id: &str) -> Result<Option<FeeRecord>> {
        let fees = lock_table(&self.store.fees, "fee")?;
        Ok(fees.iter().find(|r| r.id == id).cloned())
    }

    fn apply_payment(&self, record_id: &str, payment: FeePayment) -> Result<PaymentOutcome> {
        let mut fees = lock_table(&self.store.fees, "fee")?;
        let record = match fees.iter_mut().find(|r| r.id == record_id) {
            Some(r) => r,
            None => return Ok(PaymentOutcome::NotFound),
        };

        let balance = record.balance();
        if payment.amount > balance {
            return Ok(PaymentOutcome::ExceedsBalance { balance });
        }

        record.paid_amount += payment.amount;
        record.status = FeeStatus::from_amounts(record.paid_amount, record.total_amount);
        record.payments.push(payment);
        Ok(PaymentOutcome::Applied(record.clone()))
    }

    fn list_records(&self, student_id: Option<&str>) -> Result<Vec<FeeRecord>> {
        let fees = lock_table(&self.store.fees, "fee")?;
        Ok(fees
            .iter()
            .filter(|r| student_id.map_or(true, |id| r.student_id == id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fee_record(student_id: &str, semester_id: &str, total: f64) -> FeeRecord {
        FeeRecord {
            id: FeeRecord::generate_id(),
            student_id: student_id.to_string(),
            semester_id: semester_id.to_string(),
            total_amount: total,
            paid_amount: 0.0,
            due_date: None,
            status: FeeStatus::Pending,
            payments: Vec::new(),
        }
    }

    fn payment(amount: f64) -> FeePayment {
        FeePayment {
            amount,
            date: Utc::now(),
            method: None,
            receipt_no: FeePayment::generate_receipt_no(),
        }
    }

    #[test]
    fn test_store_rejects_duplicate_student_semester_pair() {
        let repo = FeeRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo
            .store_record(&fee_record("student::1", "sem::1", 1000.0))
            .unwrap());
        assert!(!repo
            .store_record(&fee_record("student::1", "sem::1", 500.0))
            .unwrap());
        assert!(repo
            .store_record(&fee_record("student::1", "sem::2", 1000.0))
            .unwrap());
    }

    #[test]
    fn test_apply_payment_updates_amounts_and_status() {
        let repo = FeeRepository::new(Arc::new(MemoryStore::new()));
        let record = fee_record("student::1", "sem::1", 1000.0);
        repo.store_record(&record).unwrap();

        let outcome = repo.apply_payment(&record.id, payment(400.0)).unwrap();
        let updated = match outcome {
            PaymentOutcome::Applied(r) => r,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(updated.paid_amount, 400.0);
        assert_eq!(updated.status, FeeStatus::Partial);
        assert_eq!(updated.payments.len(), 1);
    }

    #[test]
    fn test_apply_payment_rejects_overshoot() {
        let repo = FeeRepository::new(Arc::new(MemoryStore::new()));
        let record = fee_record("student::1", "sem::1", 100.0);
        repo.store_record(&record).unwrap();

        let outcome = repo.apply_payment(&record.id, payment(150.0)).unwrap();
        assert_eq!(outcome, PaymentOutcome::ExceedsBalance { balance: 100.0 });

        // Nothing was written.
        let stored = repo.get_record(&record.id).unwrap().unwrap();
        assert_eq!(stored.paid_amount, 0.0);
        assert!(stored.payments.is_empty());
    }

    #[test]
    fn test_apply_payment_missing_record() {
        let repo = FeeRepository::new(Arc::new(MemoryStore::new()));
        let outcome = repo.apply_payment("fee::nope", payment(10.0)).unwrap();
        assert_eq!(outcome, PaymentOutcome::NotFound);
    }
}
