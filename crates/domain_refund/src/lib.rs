//! Refund Domain
//!
//! Refund requests against active contracts and the coverage ledger that
//! caps their payouts. A request is created once per claim, carries the
//! covered amount the ledger granted it, and then transitions New to
//! Approved or New to Rejected, terminal either way.

pub mod error;
pub mod ledger;
pub mod ports;
pub mod refund;
pub mod service;

pub use error::RefundError;
pub use ledger::{consumed_total, covered_amount};
pub use ports::RefundStore;
pub use refund::{RefundAttachment, RefundRequest, RefundStatus};
pub use service::{NewRefund, RefundService};
