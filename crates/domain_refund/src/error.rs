//! Refund domain errors

use core_kernel::{MoneyError, PortError};
use thiserror::Error;

/// Errors surfaced by refund operations
#[derive(Debug, Error)]
pub enum RefundError {
    /// A lifecycle precondition or input constraint was violated
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// The coverage budget for the period is exhausted
    #[error("conflict: {0}")]
    Conflict(String),

    /// A collaborator failed in a way the caller cannot correct
    #[error("internal error: {0}")]
    Internal(String),

    /// Monetary arithmetic failed
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl RefundError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<PortError> for RefundError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => RefundError::NotFound { entity_type, id },
            PortError::Validation { message } => RefundError::Validation(message),
            PortError::Conflict { message } => RefundError::Conflict(message),
            PortError::Connection { message, .. } | PortError::Internal { message, .. } => {
                RefundError::Internal(message)
            }
        }
    }
}
