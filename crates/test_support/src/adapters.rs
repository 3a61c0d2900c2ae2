//! In-memory port adapters
//!
//! HashMap-backed implementations of the domain ports, safe to share across
//! tasks. The notifier records everything it is asked to send and can be
//! switched into a failing mode to exercise the abort-on-notification-error
//! paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use core_kernel::{ClientId, ContractId, DomainPort, InsuranceId, PortError, RefundRequestId};
use domain_contract::{
    ClientDirectory, ClientProfile, Contract, ContractDocument, ContractStore, DocumentRenderer,
    InsuranceCatalog, Notice, Notifier,
};
use domain_insurance::Insurance;
use domain_refund::{RefundRequest, RefundStore};

/// In-memory contract store
#[derive(Default)]
pub struct InMemoryContractStore {
    contracts: RwLock<HashMap<ContractId, Contract>>,
}

impl InMemoryContractStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds a contract directly, bypassing the service layer
    pub async fn insert(&self, contract: Contract) {
        self.contracts.write().await.insert(contract.id, contract);
    }
}

impl DomainPort for InMemoryContractStore {}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn get(&self, id: ContractId) -> Result<Contract, PortError> {
        self.contracts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Contract", id))
    }

    async fn save(&self, contract: &Contract) -> Result<(), PortError> {
        self.contracts
            .write()
            .await
            .insert(contract.id, contract.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Contract>, PortError> {
        Ok(self.contracts.read().await.values().cloned().collect())
    }

    async fn find_by_client(&self, client_id: ClientId) -> Result<Vec<Contract>, PortError> {
        Ok(self
            .contracts
            .read()
            .await
            .values()
            .filter(|contract| contract.client_id == client_id)
            .cloned()
            .collect())
    }
}

/// In-memory insurance catalog
#[derive(Default)]
pub struct InMemoryInsuranceCatalog {
    insurances: RwLock<HashMap<InsuranceId, Insurance>>,
}

impl InMemoryInsuranceCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn insert(&self, insurance: Insurance) {
        self.insurances.write().await.insert(insurance.id, insurance);
    }
}

impl DomainPort for InMemoryInsuranceCatalog {}

#[async_trait]
impl InsuranceCatalog for InMemoryInsuranceCatalog {
    async fn get(&self, id: InsuranceId) -> Result<Insurance, PortError> {
        self.insurances
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Insurance", id))
    }
}

/// In-memory client directory
#[derive(Default)]
pub struct InMemoryClientDirectory {
    clients: RwLock<HashMap<ClientId, ClientProfile>>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn insert(&self, profile: ClientProfile) {
        self.clients.write().await.insert(profile.id, profile);
    }
}

impl DomainPort for InMemoryClientDirectory {}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    async fn get(&self, id: ClientId) -> Result<ClientProfile, PortError> {
        self.clients
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Client", id))
    }
}

/// In-memory refund store
#[derive(Default)]
pub struct InMemoryRefundStore {
    requests: RwLock<HashMap<RefundRequestId, RefundRequest>>,
}

impl InMemoryRefundStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn insert(&self, request: RefundRequest) {
        self.requests.write().await.insert(request.id, request);
    }
}

impl DomainPort for InMemoryRefundStore {}

#[async_trait]
impl RefundStore for InMemoryRefundStore {
    async fn get(&self, id: RefundRequestId) -> Result<RefundRequest, PortError> {
        self.requests
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("RefundRequest", id))
    }

    async fn save(&self, request: &RefundRequest) -> Result<(), PortError> {
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<RefundRequest>, PortError> {
        Ok(self.requests.read().await.values().cloned().collect())
    }

    async fn find_on_or_after(
        &self,
        boundary: Option<NaiveDate>,
    ) -> Result<Vec<RefundRequest>, PortError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .filter(|request| boundary.map_or(true, |day| request.date >= day))
            .cloned()
            .collect())
    }
}

/// A sent notification captured by the recording notifier
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotice {
    pub recipient: String,
    pub notice: Notice,
}

/// Notifier that records every notice and can be made to fail
#[derive(Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<SentNotice>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every subsequent notify call fail
    pub fn fail_next_sends(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SentNotice> {
        self.sent.read().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

impl DomainPort for RecordingNotifier {}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, recipient_email: &str, notice: Notice) -> Result<(), PortError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PortError::internal("mail gateway unavailable"));
        }
        self.sent.write().await.push(SentNotice {
            recipient: recipient_email.to_string(),
            notice,
        });
        Ok(())
    }
}

/// Renderer that produces a fixed placeholder document
#[derive(Default)]
pub struct StubRenderer {
    failing: AtomicBool,
}

impl StubRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every subsequent render call fail
    pub fn fail_next_renders(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl DomainPort for StubRenderer {}

#[async_trait]
impl DocumentRenderer for StubRenderer {
    async fn render(
        &self,
        contract: &Contract,
        _client: &ClientProfile,
        _insurance: &Insurance,
    ) -> Result<ContractDocument, PortError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PortError::internal("renderer unavailable"));
        }
        Ok(ContractDocument {
            content: format!("contract document for {}", contract.id).into_bytes(),
        })
    }
}
