//! Refund Domain Ports

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::{DomainPort, PortError, RefundRequestId};

use crate::refund::RefundRequest;

/// Persistence port for refund requests
#[async_trait]
pub trait RefundStore: DomainPort {
    /// Retrieves a refund request by ID, or `PortError::NotFound`
    async fn get(&self, id: RefundRequestId) -> Result<RefundRequest, PortError>;

    /// Persists the request, inserting or replacing it
    async fn save(&self, request: &RefundRequest) -> Result<(), PortError>;

    /// Returns every refund request in the system
    async fn all(&self) -> Result<Vec<RefundRequest>, PortError>;

    /// Returns every request dated on or after the boundary, system-wide
    ///
    /// A `None` boundary matches everything; the ledger uses that when the
    /// contract has no payments to anchor the accounting period.
    async fn find_on_or_after(
        &self,
        boundary: Option<NaiveDate>,
    ) -> Result<Vec<RefundRequest>, PortError>;
}
