//! Typed error taxonomy returned by every domain service.
//!
//! All failures are synchronous validation results handed back to the
//! caller; nothing is retried internally and no failure is fatal to the
//! process. The REST layer translates each variant to an HTTP status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("payment of {amount:.2} exceeds outstanding balance of {balance:.2}")]
    ExceedsBalance { amount: f64, balance: f64 },

    #[error("session has expired")]
    Expired,

    #[error("attendance already recorded for this session")]
    AlreadyDone,

    /// Storage-level failure (e.g. a poisoned table lock). Never expected in
    /// normal operation.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
