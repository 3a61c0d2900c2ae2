//! Contract Lifecycle Domain
//!
//! This crate implements the contract side of the engine: the aggregate that
//! carries a contract from creation to active status through four approval
//! gates, the calendar arithmetic that assigns payments to billing-period
//! buckets, and the orchestrating service that composes the collaborator
//! ports (store, catalog, directory, notifier, renderer).
//!
//! # Contract lifecycle
//!
//! ```text
//! Pending --(all gates + client approval)--> Active
//!         \-> Cancelled / RejectedByClient / Expired
//! ```
//!
//! A contract becomes Active only when the UploadDocuments, DocumentApproval
//! and PaymentApproval gates are already satisfied and the client approval
//! is granted; activation re-anchors the start date, which becomes the
//! billing-cycle anchor for period resolution.

pub mod aggregate;
pub mod error;
pub mod payment;
pub mod period;
pub mod ports;
pub mod service;
pub mod settings;
pub mod steps;

pub use aggregate::{Beneficiary, Contract, ContractStatus};
pub use error::ContractError;
pub use payment::{Payment, PaymentProof, PaymentType};
pub use period::{find_current_payment, resolve_period_bucket, PeriodKey};
pub use ports::{
    ClientDirectory, ClientProfile, ContractDocument, ContractStore, DocumentRenderer,
    InsuranceCatalog, Notice, Notifier,
};
pub use service::{
    CheckoutCompleted, ContractDetail, ContractService, ContractSummary, NewContract, NewPayment,
};
pub use settings::EngineSettings;
pub use steps::{ContractStep, StepStatuses};
