//! Fee ledger service.
//!
//! One record per (student, semester). The record only ever changes by
//! appending a payment; paid_amount grows monotonically and the status is
//! recomputed from the amounts on every write.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::domain::commands::fees::{
    CreateFeeRecordCommand, DefaulterEntry, RecordPaymentCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::fee::{FeePayment, FeeRecord, FeeStatus, PaymentOutcome};
use crate::storage::memory::{FeeRepository, MemoryStore, StudentRepository};
use crate::storage::traits::{FeeStorage, StudentStorage};

#[derive(Clone)]
pub struct FeeService {
    fee_repository: FeeRepository,
    student_repository: StudentRepository,
}

impl FeeService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            fee_repository: FeeRepository::new(store.clone()),
            student_repository: StudentRepository::new(store),
        }
    }

    /// Open a fee record for one (student, semester).
    pub fn create_record(&self, command: CreateFeeRecordCommand) -> DomainResult<FeeRecord> {
        if command.total_amount <= 0.0 {
            return Err(DomainError::invalid_input("totalAmount must be positive"));
        }
        if !self.student_repository.student_exists(&command.student_id)? {
            return Err(DomainError::not_found("student", &command.student_id));
        }

        let record = FeeRecord {
            id: FeeRecord::generate_id(),
            student_id: command.student_id,
            semester_id: command.semester_id,
            total_amount: command.total_amount,
            paid_amount: 0.0,
            due_date: command.due_date,
            status: FeeStatus::Pending,
            payments: Vec::new(),
        };

        if !self.fee_repository.store_record(&record)? {
            return Err(DomainError::conflict(format!(
                "a fee record already exists for student {} in {}",
                record.student_id, record.semester_id
            )));
        }

        info!(
            "Opened fee record {} for {} ({:.2} due)",
            record.id, record.student_id, record.total_amount
        );
        Ok(record)
    }

    /// Append one payment.
    ///
    /// The balance check and the write happen atomically in the repository,
    /// so concurrent payments against the same record serialize.
    pub fn record_payment(&self, command: RecordPaymentCommand) -> DomainResult<FeeRecord> {
        if command.amount <= 0.0 {
            return Err(DomainError::invalid_input("payment amount must be positive"));
        }

        let payment = FeePayment {
            amount: command.amount,
            date: Utc::now(),
            method: command.method,
            receipt_no: FeePayment::generate_receipt_no(),
        };

        match self
            .fee_repository
            .apply_payment(&command.record_id, payment)?
        {
            PaymentOutcome::NotFound => {
                Err(DomainError::not_found("fee record", &command.record_id))
            }
            PaymentOutcome::ExceedsBalance { balance } => Err(DomainError::ExceedsBalance {
                amount: command.amount,
                balance,
            }),
            PaymentOutcome::Applied(record) => {
                info!(
                    "Payment of {:.2} applied to {}; balance now {:.2} ({:?})",
                    command.amount,
                    record.id,
                    record.balance(),
                    record.status
                );
                Ok(record)
            }
        }
    }

    pub fn get_record(&self, id: &str) -> DomainResult<FeeRecord> {
        self.fee_repository
            .get_record(id)?
            .ok_or_else(|| DomainError::not_found("fee record", id))
    }

    pub fn list_records(&self, student_id: Option<&str>) -> DomainResult<Vec<FeeRecord>> {
        Ok(self.fee_repository.list_records(student_id)?)
    }

    /// Unpaid records past their due date, largest outstanding balance
    /// first, annotated with how many days overdue they are.
    pub fn defaulters(&self) -> DomainResult<Vec<DefaulterEntry>> {
        let today = Utc::now().date_naive();
        let mut entries: Vec<DefaulterEntry> = self
            .fee_repository
            .list_records(None)?
            .into_iter()
            .filter(|record| record.status != FeeStatus::Paid)
            .filter_map(|record| match record.due_date {
                Some(due) if due < today => Some(DefaulterEntry {
                    balance: record.balance(),
                    overdue_days: (today - due).num_days(),
                    record,
                }),
                _ => None,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.balance
                .partial_cmp(&a.balance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(entries)
    }
}
