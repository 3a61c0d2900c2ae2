//! Premium payments
//!
//! A payment belongs to exactly one contract and carries at most one
//! proof-of-payment attachment reference. Functionally at most one payment
//! exists per billing-period bucket; manual submissions within the same
//! bucket update the existing payment instead of inserting a duplicate.

use chrono::NaiveDate;
use core_kernel::{Money, PaymentId};
use serde::{Deserialize, Serialize};

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Cash,
    Transfer,
    Card,
}

/// Reference to a stored proof-of-payment document
///
/// File contents live behind the attachment storage collaborator; the
/// engine keeps only the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof {
    pub file_name: String,
    pub path_reference: String,
}

/// A premium payment on a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// How the payment was made
    pub payment_type: PaymentType,
    /// Amount paid; always the contract's periodic amount
    pub amount: Money,
    /// Date the payment was recorded
    pub date: NaiveDate,
    /// Gateway checkout session id, for webhook-recorded card payments
    pub reference_session_id: Option<String>,
    /// Proof-of-payment attachment, at most one
    pub proof: Option<PaymentProof>,
}

impl Payment {
    /// Creates a manually recorded payment
    pub fn manual(
        payment_type: PaymentType,
        amount: Money,
        date: NaiveDate,
        proof: Option<PaymentProof>,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            payment_type,
            amount,
            date,
            reference_session_id: None,
            proof,
        }
    }

    /// Creates a card payment recorded from a completed checkout session
    pub fn from_checkout(amount: Money, date: NaiveDate, session_id: impl Into<String>) -> Self {
        Self {
            id: PaymentId::new_v7(),
            payment_type: PaymentType::Card,
            amount,
            date,
            reference_session_id: Some(session_id.into()),
            proof: None,
        }
    }
}
