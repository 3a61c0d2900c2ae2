//! Refund requests
//!
//! A refund request records a claim against an active contract: what the
//! client paid out of pocket and how much of it the coverage ledger agreed
//! to reimburse. The status lifecycle is New to Approved or New to
//! Rejected; both outcomes are terminal.

use chrono::NaiveDate;
use core_kernel::{AttachmentId, ContractId, Money, RefundRequestId};
use serde::{Deserialize, Serialize};

use crate::error::RefundError;

/// Lifecycle status of a refund request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    New,
    Approved,
    Rejected,
}

impl RefundStatus {
    /// True once the request reached a terminal status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RefundStatus::New)
    }
}

/// Reference to a stored claim document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundAttachment {
    pub id: AttachmentId,
    pub file_name: String,
    pub path_reference: String,
}

/// A claim for reimbursement under a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    pub id: RefundRequestId,
    pub contract_id: ContractId,
    /// Free-text claim category (emergency, prescription, surgery, ...)
    pub refund_type: String,
    pub description: String,
    /// Date the request was registered
    pub date: NaiveDate,
    /// Audit note set by the approve and reject transitions
    pub observation: Option<String>,
    /// Amount the client claims to have paid
    pub amount_paid: Money,
    /// Amount the ledger granted; zeroed on rejection
    pub covered_amount: Money,
    pub status: RefundStatus,
    pub attachments: Vec<RefundAttachment>,
}

impl RefundRequest {
    /// Creates a new request with the ledger-granted covered amount
    pub fn new(
        contract_id: ContractId,
        refund_type: String,
        description: String,
        date: NaiveDate,
        amount_paid: Money,
        covered_amount: Money,
        attachments: Vec<RefundAttachment>,
    ) -> Self {
        Self {
            id: RefundRequestId::new_v7(),
            contract_id,
            refund_type,
            description,
            date,
            observation: None,
            amount_paid,
            covered_amount,
            status: RefundStatus::New,
            attachments,
        }
    }

    /// Approves the request, leaving the covered amount as computed
    ///
    /// Fails when the request already reached a terminal status.
    pub fn approve(&mut self) -> Result<(), RefundError> {
        self.ensure_open()?;
        self.status = RefundStatus::Approved;
        self.observation = Some("Refund approved".to_string());
        self.description.clear();
        Ok(())
    }

    /// Rejects the request and removes its weight from the ledger
    ///
    /// The covered amount is reset to zero so subsequent ledger
    /// computations no longer count this claim. Fails when the request
    /// already reached a terminal status.
    pub fn reject(&mut self, reason: &str) -> Result<(), RefundError> {
        self.ensure_open()?;
        self.status = RefundStatus::Rejected;
        self.observation = Some(format!("Rejection reason: {reason}"));
        self.covered_amount = Money::zero(self.covered_amount.currency());
        Ok(())
    }

    /// Replaces the claim documents on a still-open request
    ///
    /// Count validation lives with the service settings; here only the
    /// terminal-status guard applies.
    pub fn replace_attachments(
        &mut self,
        attachments: Vec<RefundAttachment>,
    ) -> Result<(), RefundError> {
        self.ensure_open()?;
        self.attachments = attachments;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), RefundError> {
        if self.status.is_terminal() {
            return Err(RefundError::validation(
                "refund request is already in a terminal status",
            ));
        }
        Ok(())
    }
}
