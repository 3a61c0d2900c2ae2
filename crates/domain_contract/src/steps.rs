//! Approval step gates
//!
//! Every contract tracks four boolean milestones. All of them must be
//! satisfied before the contract can become active; the client approval is
//! the gate that performs the activation itself. Entries are created at
//! contract creation and persist for the lifetime of the contract.

use serde::{Deserialize, Serialize};

/// The four approval gates of the contract workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStep {
    /// Client has submitted identification and portrait documents
    UploadDocuments,
    /// Staff approved the uploaded documents
    DocumentApproval,
    /// First payment recognized (manual save or gateway webhook)
    PaymentApproval,
    /// Client approval; completing it activates the contract
    ClientApproval,
}

impl ContractStep {
    /// All steps in workflow order
    pub const ALL: [ContractStep; 4] = [
        ContractStep::UploadDocuments,
        ContractStep::DocumentApproval,
        ContractStep::PaymentApproval,
        ContractStep::ClientApproval,
    ];
}

/// Completion state of the four gates
///
/// A fixed record rather than a map: the step set is closed and entries are
/// never removed. Mutated only by the workflow transitions on the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepStatuses {
    pub upload_documents: bool,
    pub document_approval: bool,
    pub payment_approval: bool,
    pub client_approval: bool,
}

impl StepStatuses {
    /// Initial gate state at contract creation
    ///
    /// UploadDocuments starts true when the client already has documents on
    /// file; every other gate starts false.
    pub fn initial(client_has_documents: bool) -> Self {
        Self {
            upload_documents: client_has_documents,
            ..Self::default()
        }
    }

    /// Returns the completion flag for a step
    pub fn get(&self, step: ContractStep) -> bool {
        match step {
            ContractStep::UploadDocuments => self.upload_documents,
            ContractStep::DocumentApproval => self.document_approval,
            ContractStep::PaymentApproval => self.payment_approval,
            ContractStep::ClientApproval => self.client_approval,
        }
    }

    /// Sets the completion flag for a step
    pub fn set(&mut self, step: ContractStep, completed: bool) {
        match step {
            ContractStep::UploadDocuments => self.upload_documents = completed,
            ContractStep::DocumentApproval => self.document_approval = completed,
            ContractStep::PaymentApproval => self.payment_approval = completed,
            ContractStep::ClientApproval => self.client_approval = completed,
        }
    }

    /// True when every gate other than the client approval is satisfied
    ///
    /// This is both the precondition for contract approval and the trigger
    /// for rendering the contract document in listings.
    pub fn prerequisites_complete(&self) -> bool {
        ContractStep::ALL
            .iter()
            .filter(|step| **step != ContractStep::ClientApproval)
            .all(|step| self.get(*step))
    }
}
