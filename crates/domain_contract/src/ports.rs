//! Contract Domain Ports
//!
//! Port interfaces for everything the contract domain reaches outside
//! itself for: contract persistence, the insurance product catalog, the
//! client directory, client notification, and contract document rendering.
//! Implementations live behind these traits (database, mail gateway, PDF
//! renderer, or the in-memory test adapters).
//!
//! All methods are async and return `Result<T, PortError>` for consistent
//! error handling across adapter implementations.

use async_trait::async_trait;

use core_kernel::{ClientId, ContractId, DomainPort, InsuranceId, Money, PortError};
use domain_insurance::{Condition, Insurance};

use crate::aggregate::Contract;

/// The client data the contract domain needs
///
/// A projection of the client record: identity, where to send notices, the
/// risk conditions that drive the premium, and whether the identification
/// documents are already on file.
#[derive(Debug, Clone)]
pub struct ClientProfile {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    /// Notification recipient
    pub email: String,
    /// Risk conditions feeding the premium surcharge
    pub conditions: Vec<Condition>,
    /// True when any identification attachment is already stored
    pub has_documents: bool,
}

/// Persistence port for the contract aggregate
///
/// Loads and saves the full object graph: steps, beneficiaries, and owned
/// payments travel with the contract.
#[async_trait]
pub trait ContractStore: DomainPort {
    /// Retrieves a contract by ID, or `PortError::NotFound`
    async fn get(&self, id: ContractId) -> Result<Contract, PortError>;

    /// Persists the contract, inserting or replacing the whole aggregate
    async fn save(&self, contract: &Contract) -> Result<(), PortError>;

    /// Returns every contract in the system
    async fn all(&self) -> Result<Vec<Contract>, PortError>;

    /// Returns all contracts belonging to one client
    async fn find_by_client(&self, client_id: ClientId) -> Result<Vec<Contract>, PortError>;
}

/// Read-only port over the insurance product catalog
#[async_trait]
pub trait InsuranceCatalog: DomainPort {
    /// Retrieves an insurance product by ID, or `PortError::NotFound`
    async fn get(&self, id: InsuranceId) -> Result<Insurance, PortError>;
}

/// Read-only port over the client registry
#[async_trait]
pub trait ClientDirectory: DomainPort {
    /// Retrieves a client profile by ID, or `PortError::NotFound`
    async fn get(&self, id: ClientId) -> Result<ClientProfile, PortError>;
}

/// The notices the engine sends to clients
///
/// Template selection and transport belong to the adapter; the domain only
/// names the notice kind and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The client must upload identification documents to continue
    UploadDocumentsReminder,
    /// Uploaded documents were rejected with an observation
    DocumentsRejected { observation: String },
    /// A payment was received and approved
    PaymentApproved,
    /// The contract was activated
    ContractActivated,
    /// A refund request was registered
    RefundSubmitted,
    /// A refund request was approved for the covered amount
    RefundApproved { covered_amount: Money },
    /// A refund request was rejected with a reason
    RefundRejected { reason: String },
}

/// Outbound notification port
///
/// Fire-and-forget from the domain's perspective, but a delivery failure
/// propagates and aborts the operation that triggered it.
#[async_trait]
pub trait Notifier: DomainPort {
    async fn notify(&self, recipient_email: &str, notice: Notice) -> Result<(), PortError>;
}

/// A rendered contract document, opaque to the domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDocument {
    pub content: Vec<u8>,
}

/// Contract document rendering port
///
/// Invoked for contract detail and for listings of contracts whose gates
/// other than the client approval are complete. A rendering failure is an
/// internal error, never silently skipped.
#[async_trait]
pub trait DocumentRenderer: DomainPort {
    async fn render(
        &self,
        contract: &Contract,
        client: &ClientProfile,
        insurance: &Insurance,
    ) -> Result<ContractDocument, PortError>;
}
