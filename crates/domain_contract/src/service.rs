//! Contract service
//!
//! Orchestrates the contract lifecycle: creation with the premium
//! computation and the duplicate-policy guard, the four approval
//! transitions, payment recording (manual upsert and gateway webhook),
//! the classification queries, and document-bearing read models.
//!
//! Every mutating operation runs under the per-contract lock so concurrent
//! transitions on the same contract cannot tear the gate state. The lock
//! registry is injected so the refund service can serialize against the
//! same contract keys. Client notifications are sent before the save; a
//! delivery failure aborts the operation.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{ClientId, ContractId, InsuranceId, KeyedLocks};
use domain_insurance::{periodic_amount, Insurance};
use tracing::{debug, info, instrument};

use crate::aggregate::{Beneficiary, Contract};
use crate::error::ContractError;
use crate::payment::{Payment, PaymentProof, PaymentType};
use crate::period::find_current_payment;
use crate::ports::{
    ClientDirectory, ClientProfile, ContractDocument, ContractStore, DocumentRenderer,
    InsuranceCatalog, Notice, Notifier,
};
use crate::settings::EngineSettings;

/// Request to create a contract
#[derive(Debug, Clone)]
pub struct NewContract {
    pub client_id: ClientId,
    pub insurance_id: InsuranceId,
    pub beneficiaries: Vec<Beneficiary>,
    /// Optional requested start date; activation re-anchors it later
    pub start_date: Option<NaiveDate>,
}

/// Request to record a manual premium payment
///
/// The amount is never taken from the caller; the contract's periodic
/// amount is billed regardless of what was submitted.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payment_type: PaymentType,
    pub date: NaiveDate,
    pub proof: Option<PaymentProof>,
}

/// A verified checkout-completed event from the payment gateway
#[derive(Debug, Clone)]
pub struct CheckoutCompleted {
    pub contract_id: ContractId,
    pub session_id: String,
}

/// Listing row: the contract plus its rendered document when every gate
/// other than the client approval is complete
#[derive(Debug, Clone)]
pub struct ContractSummary {
    pub contract: Contract,
    pub document: Option<ContractDocument>,
}

/// Full contract read model
#[derive(Debug, Clone)]
pub struct ContractDetail {
    pub contract: Contract,
    /// The payment covering the billing period active today, if any
    pub current_payment: Option<Payment>,
    pub document: ContractDocument,
}

/// Orchestrator for the contract lifecycle
pub struct ContractService {
    store: Arc<dyn ContractStore>,
    catalog: Arc<dyn InsuranceCatalog>,
    directory: Arc<dyn ClientDirectory>,
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn DocumentRenderer>,
    settings: EngineSettings,
    locks: Arc<KeyedLocks>,
}

impl ContractService {
    pub fn new(
        store: Arc<dyn ContractStore>,
        catalog: Arc<dyn InsuranceCatalog>,
        directory: Arc<dyn ClientDirectory>,
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn DocumentRenderer>,
        settings: EngineSettings,
        locks: Arc<KeyedLocks>,
    ) -> Self {
        Self {
            store,
            catalog,
            directory,
            notifier,
            renderer,
            settings,
            locks,
        }
    }

    /// Creates a pending contract
    ///
    /// Rejects the request when the client already holds a contract for the
    /// same insurance product. The periodic amount is the product's base
    /// payment adjusted by the client's condition surcharges. When the
    /// client has no documents on file a reminder notice goes out before
    /// the contract is persisted.
    #[instrument(skip(self, request), fields(client_id = %request.client_id, insurance_id = %request.insurance_id))]
    pub async fn create(&self, request: NewContract) -> Result<Contract, ContractError> {
        let client = self.directory.get(request.client_id).await?;
        let insurance = self.catalog.get(request.insurance_id).await?;

        let existing = self.store.find_by_client(request.client_id).await?;
        if existing
            .iter()
            .any(|contract| contract.insurance_id == request.insurance_id)
        {
            return Err(ContractError::validation(
                "client already holds a contract for this insurance",
            ));
        }

        let premium = periodic_amount(insurance.payment_amount, &client.conditions);
        let contract = Contract::create(
            request.client_id,
            request.insurance_id,
            premium,
            request.beneficiaries,
            request.start_date,
            client.has_documents,
        );

        if !contract.steps.upload_documents {
            self.notifier
                .notify(&client.email, Notice::UploadDocumentsReminder)
                .await?;
        }

        self.store.save(&contract).await?;
        info!(contract_id = %contract.id, amount = %contract.total_payment_amount, "contract created");
        Ok(contract)
    }

    /// Marks the uploaded documents as approved
    #[instrument(skip(self))]
    pub async fn approve_documents(&self, id: ContractId) -> Result<(), ContractError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut contract = self.store.get(id).await?;
        contract.approve_documents();
        self.store.save(&contract).await?;
        debug!(contract_id = %id, "documents approved");
        Ok(())
    }

    /// Resets the document approval gate and notifies the client
    #[instrument(skip(self, observation))]
    pub async fn reject_documents(
        &self,
        id: ContractId,
        observation: String,
    ) -> Result<(), ContractError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut contract = self.store.get(id).await?;
        let client = self.directory.get(contract.client_id).await?;

        contract.reject_documents();
        self.notifier
            .notify(&client.email, Notice::DocumentsRejected { observation })
            .await?;
        self.store.save(&contract).await?;
        debug!(contract_id = %id, "documents rejected");
        Ok(())
    }

    /// Marks the payment gate complete and notifies the client
    #[instrument(skip(self))]
    pub async fn approve_payment(&self, id: ContractId) -> Result<(), ContractError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut contract = self.store.get(id).await?;
        let client = self.directory.get(contract.client_id).await?;

        contract.approve_payment();
        self.notifier
            .notify(&client.email, Notice::PaymentApproved)
            .await?;
        self.store.save(&contract).await?;
        debug!(contract_id = %id, "payment approved");
        Ok(())
    }

    /// Grants the client approval and activates the contract
    ///
    /// Fails with a validation error when any other gate is still open;
    /// nothing is mutated or notified in that case.
    #[instrument(skip(self))]
    pub async fn approve_contract(
        &self,
        id: ContractId,
        today: NaiveDate,
    ) -> Result<Contract, ContractError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut contract = self.store.get(id).await?;
        let client = self.directory.get(contract.client_id).await?;

        contract.approve(today)?;
        self.notifier
            .notify(&client.email, Notice::ContractActivated)
            .await?;
        self.store.save(&contract).await?;
        info!(contract_id = %id, start_date = %today, "contract activated");
        Ok(contract)
    }

    /// Records a manual premium payment, replacing any payment already in
    /// the billing period active at `today`
    #[instrument(skip(self, request))]
    pub async fn record_payment(
        &self,
        id: ContractId,
        request: NewPayment,
        today: NaiveDate,
    ) -> Result<Payment, ContractError> {
        let _guard = self.locks.acquire(*id.as_uuid()).await;
        let mut contract = self.store.get(id).await?;
        let insurance = self.catalog.get(contract.insurance_id).await?;

        let payment = Payment::manual(
            request.payment_type,
            contract.total_payment_amount,
            request.date,
            request.proof,
        );
        let stored = contract
            .upsert_current_payment(insurance.payment_period, today, payment)
            .clone();
        self.store.save(&contract).await?;
        debug!(contract_id = %id, payment_id = %stored.id, "payment recorded");
        Ok(stored)
    }

    /// Applies a verified gateway checkout completion
    ///
    /// Completes the payment gate and appends a card payment carrying the
    /// checkout session id, exactly as if the payment had been approved
    /// manually.
    #[instrument(skip(self, event), fields(contract_id = %event.contract_id))]
    pub async fn handle_checkout_completed(
        &self,
        event: CheckoutCompleted,
        today: NaiveDate,
    ) -> Result<(), ContractError> {
        let _guard = self.locks.acquire(*event.contract_id.as_uuid()).await;
        let mut contract = self.store.get(event.contract_id).await?;

        contract.approve_payment();
        let payment =
            Payment::from_checkout(contract.total_payment_amount, today, event.session_id);
        contract.payments.push(payment);
        self.store.save(&contract).await?;
        info!(contract_id = %event.contract_id, "checkout payment applied");
        Ok(())
    }

    /// Contracts whose payment gate is open or whose first cycle lapsed
    pub async fn find_unpaid(&self, today: NaiveDate) -> Result<Vec<Contract>, ContractError> {
        self.classify(|contract, insurance| contract.is_unpaid(insurance.payment_period, today))
            .await
    }

    /// Live contracts whose current cycle ends within the configured window
    pub async fn find_expiring_soon(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Contract>, ContractError> {
        let window = self.settings.expiring_soon_window_days;
        self.classify(|contract, insurance| {
            contract.is_expiring_soon(insurance.payment_period, today, window)
        })
        .await
    }

    /// Live contracts whose current cycle ended before today
    pub async fn find_expired(&self, today: NaiveDate) -> Result<Vec<Contract>, ContractError> {
        self.classify(|contract, insurance| contract.is_expired(insurance.payment_period, today))
            .await
    }

    /// Contracts still in Pending status
    pub async fn find_pending(&self) -> Result<Vec<Contract>, ContractError> {
        let contracts = self.store.all().await?;
        Ok(contracts
            .into_iter()
            .filter(Contract::is_pending)
            .collect())
    }

    /// Full read model for one contract
    ///
    /// Renders the contract document and resolves the payment covering the
    /// billing period active at `today`. A rendering failure surfaces as an
    /// internal error.
    #[instrument(skip(self))]
    pub async fn contract_detail(
        &self,
        id: ContractId,
        today: NaiveDate,
    ) -> Result<ContractDetail, ContractError> {
        let contract = self.store.get(id).await?;
        let client = self.directory.get(contract.client_id).await?;
        let insurance = self.catalog.get(contract.insurance_id).await?;

        let current_payment = contract
            .current_bucket(insurance.payment_period, today)
            .and_then(|bucket| find_current_payment(&contract.payments, bucket))
            .cloned();

        let document = self.render(&contract, &client, &insurance).await?;

        Ok(ContractDetail {
            contract,
            current_payment,
            document,
        })
    }

    /// All contracts, each with its rendered document once every gate other
    /// than the client approval is complete
    pub async fn list_contracts(&self) -> Result<Vec<ContractSummary>, ContractError> {
        let contracts = self.store.all().await?;
        let mut summaries = Vec::with_capacity(contracts.len());
        for contract in contracts {
            let document = if contract.steps.prerequisites_complete() {
                let client = self.directory.get(contract.client_id).await?;
                let insurance = self.catalog.get(contract.insurance_id).await?;
                Some(self.render(&contract, &client, &insurance).await?)
            } else {
                None
            };
            summaries.push(ContractSummary { contract, document });
        }
        Ok(summaries)
    }

    async fn render(
        &self,
        contract: &Contract,
        client: &ClientProfile,
        insurance: &Insurance,
    ) -> Result<ContractDocument, ContractError> {
        self.renderer
            .render(contract, client, insurance)
            .await
            .map_err(|err| ContractError::internal(format!("contract rendering failed: {err}")))
    }

    async fn classify<F>(&self, predicate: F) -> Result<Vec<Contract>, ContractError>
    where
        F: Fn(&Contract, &Insurance) -> bool,
    {
        let contracts = self.store.all().await?;
        let mut matched = Vec::new();
        for contract in contracts {
            let insurance = self.catalog.get(contract.insurance_id).await?;
            if predicate(&contract, &insurance) {
                matched.push(contract);
            }
        }
        Ok(matched)
    }
}
