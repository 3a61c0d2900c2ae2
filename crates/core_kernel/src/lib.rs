//! Core Kernel - Foundational types for the contract engine
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - The shared port error type consumed by collaborator adapters
//! - A keyed lock registry for per-contract mutual exclusion

pub mod identifiers;
pub mod locks;
pub mod money;
pub mod ports;

pub use identifiers::{
    AttachmentId, BeneficiaryId, ClientId, ConditionId, ContractId, InsuranceId, PaymentId,
    RefundRequestId,
};
pub use locks::KeyedLocks;
pub use money::{Currency, Money, MoneyError};
pub use ports::{DomainPort, PortError};
