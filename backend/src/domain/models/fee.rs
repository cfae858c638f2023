use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fee record status, always derived from the paid/total amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Pending,
    Partial,
    Paid,
}

impl FeeStatus {
    /// The status function: paid iff paid >= total, partial iff 0 < paid < total,
    /// pending otherwise.
    pub fn from_amounts(paid_amount: f64, total_amount: f64) -> FeeStatus {
        if paid_amount >= total_amount {
            FeeStatus::Paid
        } else if paid_amount > 0.0 {
            FeeStatus::Partial
        } else {
            FeeStatus::Pending
        }
    }
}

/// One payment applied against a fee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeePayment {
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub method: Option<String>,
    pub receipt_no: String,
}

impl FeePayment {
    pub fn generate_receipt_no() -> String {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect();
        format!("RCP-{}", token.to_uppercase())
    }
}

/// The fee ledger entry for one (student, semester).
///
/// Invariant: 0 <= paid_amount <= total_amount; paid_amount only grows, one
/// appended payment at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub id: String,
    pub student_id: String,
    pub semester_id: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub due_date: Option<NaiveDate>,
    pub status: FeeStatus,
    pub payments: Vec<FeePayment>,
}

impl FeeRecord {
    pub fn generate_id() -> String {
        format!("fee::{}", Uuid::new_v4())
    }

    /// Outstanding balance
    pub fn balance(&self) -> f64 {
        self.total_amount - self.paid_amount
    }
}

/// Outcome of an atomic payment attempt against the fee table.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    NotFound,
    /// The payment would overshoot the outstanding balance
    ExceedsBalance { balance: f64 },
    Applied(FeeRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_amounts() {
        assert_eq!(FeeStatus::from_amounts(0.0, 1000.0), FeeStatus::Pending);
        assert_eq!(FeeStatus::from_amounts(400.0, 1000.0), FeeStatus::Partial);
        assert_eq!(FeeStatus::from_amounts(1000.0, 1000.0), FeeStatus::Paid);
        assert_eq!(FeeStatus::from_amounts(1200.0, 1000.0), FeeStatus::Paid);
    }

    #[test]
    fn test_receipt_no_shape() {
        let receipt = FeePayment::generate_receipt_no();
        assert!(receipt.starts_with("RCP-"));
        assert_eq!(receipt.len(), 12);
    }
}
