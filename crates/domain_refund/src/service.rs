//! Refund service
//!
//! Orchestrates the refund lifecycle: submission with the coverage-ledger
//! computation, the terminal approve and reject transitions, and the read
//! queries.
//!
//! Submission holds two locks across the compute-and-persist window: the
//! per-contract lock, and a process-wide ledger lock so two concurrent
//! claims cannot both observe the same remaining budget and jointly
//! overspend it. The lock registry is shared with the contract service, so
//! a submit and a payment or approval transition on the same contract are
//! serialized against each other.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{ContractId, KeyedLocks, Money, RefundRequestId};
use domain_contract::{
    ClientDirectory, ContractStatus, ContractStore, EngineSettings, InsuranceCatalog, Notice,
    Notifier,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::RefundError;
use crate::ledger::{consumed_total, covered_amount};
use crate::ports::RefundStore;
use crate::refund::{RefundAttachment, RefundRequest};

/// Request to submit a refund claim
#[derive(Debug, Clone)]
pub struct NewRefund {
    pub contract_id: ContractId,
    pub refund_type: String,
    pub description: String,
    /// Amount the client paid out of pocket
    pub amount_paid: Money,
    pub attachments: Vec<RefundAttachment>,
}

/// Orchestrator for refund requests
pub struct RefundService {
    refunds: Arc<dyn RefundStore>,
    contracts: Arc<dyn ContractStore>,
    catalog: Arc<dyn InsuranceCatalog>,
    directory: Arc<dyn ClientDirectory>,
    notifier: Arc<dyn Notifier>,
    settings: EngineSettings,
    locks: Arc<KeyedLocks>,
    // Serializes the ledger's read-then-write across all contracts.
    ledger_lock: Mutex<()>,
}

impl RefundService {
    pub fn new(
        refunds: Arc<dyn RefundStore>,
        contracts: Arc<dyn ContractStore>,
        catalog: Arc<dyn InsuranceCatalog>,
        directory: Arc<dyn ClientDirectory>,
        notifier: Arc<dyn Notifier>,
        settings: EngineSettings,
        locks: Arc<KeyedLocks>,
    ) -> Self {
        Self {
            refunds,
            contracts,
            catalog,
            directory,
            notifier,
            settings,
            locks,
            ledger_lock: Mutex::new(()),
        }
    }

    /// Submits a refund claim against an active contract
    ///
    /// The contract must be Active and the claim must carry between one and
    /// three attachments. The covered amount is whatever the coverage
    /// ledger grants; an exhausted budget is a conflict and nothing is
    /// persisted. The confirmation notice goes out after the save; its
    /// failure still surfaces as an internal error.
    #[instrument(skip(self, request), fields(contract_id = %request.contract_id))]
    pub async fn submit(
        &self,
        request: NewRefund,
        today: NaiveDate,
    ) -> Result<RefundRequest, RefundError> {
        let _contract_guard = self.locks.acquire(*request.contract_id.as_uuid()).await;
        let _ledger_guard = self.ledger_lock.lock().await;

        let contract = self.contracts.get(request.contract_id).await?;
        if contract.status != ContractStatus::Active {
            return Err(RefundError::validation("contract is not active"));
        }

        self.validate_attachment_count(request.attachments.len())?;

        let insurance = self.catalog.get(contract.insurance_id).await?;
        let boundary = contract.last_payment_date();
        let period_requests = self.refunds.find_on_or_after(boundary).await?;
        let consumed = consumed_total(
            &period_requests,
            Money::zero(self.settings.default_currency),
        )?;
        let covered = covered_amount(insurance.coverage, consumed, request.amount_paid)?;
        debug!(
            contract_id = %contract.id,
            consumed = %consumed,
            covered = %covered,
            "ledger granted coverage"
        );

        let refund = RefundRequest::new(
            contract.id,
            request.refund_type,
            request.description,
            today,
            request.amount_paid,
            covered,
            request.attachments,
        );
        self.refunds.save(&refund).await?;

        let client = self.directory.get(contract.client_id).await?;
        self.notifier
            .notify(&client.email, Notice::RefundSubmitted)
            .await
            .map_err(|err| RefundError::internal(format!("refund notice failed: {err}")))?;

        info!(refund_id = %refund.id, "refund request submitted");
        Ok(refund)
    }

    /// Approves a pending refund request
    #[instrument(skip(self))]
    pub async fn approve(&self, id: RefundRequestId) -> Result<(), RefundError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut refund = self.refunds.get(id).await?;
        refund.approve()?;

        let contract = self.contracts.get(refund.contract_id).await?;
        let client = self.directory.get(contract.client_id).await?;
        self.notifier
            .notify(
                &client.email,
                Notice::RefundApproved {
                    covered_amount: refund.covered_amount,
                },
            )
            .await?;
        self.refunds.save(&refund).await?;
        info!(refund_id = %id, covered = %refund.covered_amount, "refund approved");
        Ok(())
    }

    /// Rejects a pending refund request
    ///
    /// The rejected claim stops counting against the coverage budget.
    #[instrument(skip(self, reason))]
    pub async fn reject(&self, id: RefundRequestId, reason: String) -> Result<(), RefundError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut refund = self.refunds.get(id).await?;
        refund.reject(&reason)?;

        let contract = self.contracts.get(refund.contract_id).await?;
        let client = self.directory.get(contract.client_id).await?;
        self.notifier
            .notify(&client.email, Notice::RefundRejected { reason })
            .await?;
        self.refunds.save(&refund).await?;
        info!(refund_id = %id, "refund rejected");
        Ok(())
    }

    /// Replaces the claim documents on a still-open refund request
    #[instrument(skip(self, attachments))]
    pub async fn update_attachments(
        &self,
        id: RefundRequestId,
        attachments: Vec<RefundAttachment>,
    ) -> Result<RefundRequest, RefundError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        self.validate_attachment_count(attachments.len())?;

        let mut refund = self.refunds.get(id).await?;
        refund.replace_attachments(attachments)?;
        self.refunds.save(&refund).await?;
        debug!(refund_id = %id, "refund attachments replaced");
        Ok(refund)
    }

    /// Every refund request in the system
    pub async fn refund_requests(&self) -> Result<Vec<RefundRequest>, RefundError> {
        Ok(self.refunds.all().await?)
    }

    /// One refund request by ID
    pub async fn refund_request(&self, id: RefundRequestId) -> Result<RefundRequest, RefundError> {
        Ok(self.refunds.get(id).await?)
    }

    fn validate_attachment_count(&self, count: usize) -> Result<(), RefundError> {
        if count < self.settings.refund_attachment_min || count > self.settings.refund_attachment_max
        {
            return Err(RefundError::validation(format!(
                "between {} and {} attachments are required",
                self.settings.refund_attachment_min, self.settings.refund_attachment_max
            )));
        }
        Ok(())
    }
}
