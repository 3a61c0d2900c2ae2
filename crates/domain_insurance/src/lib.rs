//! Insurance Catalog Domain
//!
//! This crate holds the policy-product side of the engine: the Insurance
//! product a contract is written against, the risk Conditions a client may
//! carry, and the Premium Calculator that adjusts a product's base payment
//! amount by the client's accumulated surcharges.
//!
//! Products are immutable during a single premium calculation; they are
//! loaded by id through the catalog port defined in `domain_contract`.

pub mod condition;
pub mod insurance;
pub mod premium;

pub use condition::Condition;
pub use insurance::{Insurance, InsuranceType, PaymentPeriod};
pub use premium::{document_adjusted_amount, document_percent_sum, periodic_amount};
