//! Ports and Adapters Infrastructure
//!
//! The engine never talks to the outside world directly. Persistence, mail
//! delivery, document rendering, and the payment-gateway webhook are reached
//! through port traits defined in the domain crates; every adapter reports
//! failures through the unified [`PortError`] defined here.
//!
//! Each domain defines its own port trait and marks it with [`DomainPort`]
//! so implementations are guaranteed to be shareable across async tasks:
//!
//! ```rust,ignore
//! // In domain_contract/src/ports.rs
//! #[async_trait]
//! pub trait ContractStore: DomainPort {
//!     async fn get(&self, id: ContractId) -> Result<Contract, PortError>;
//!     async fn save(&self, contract: &Contract) -> Result<(), PortError>;
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters. The variants map
/// onto the engine's caller-visible error kinds: not-found, validation,
/// conflict, and internal failure.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}
