//! Insurance products
//!
//! An Insurance is the policy product a contract is written against: its
//! base periodic payment amount, the per-period refund coverage limit, and
//! the billing period that anchors all calendar arithmetic downstream.

use core_kernel::{InsuranceId, Money};
use serde::{Deserialize, Serialize};

/// Billing recurrence of a policy's premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentPeriod {
    Monthly,
    Yearly,
}

impl PaymentPeriod {
    /// Human-readable label used in rendered contract documents
    pub fn label(&self) -> &'static str {
        match self {
            PaymentPeriod::Monthly => "Monthly",
            PaymentPeriod::Yearly => "Yearly",
        }
    }
}

/// Broad product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InsuranceType {
    Life,
    Health,
}

/// An insurance policy product
///
/// Immutable during a single premium calculation. `coverage` is the maximum
/// reimbursable amount the product grants per billing period for refund
/// claims; `payment_amount` is the base premium before client surcharges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurance {
    /// Unique identifier
    pub id: InsuranceId,
    /// Unique product name
    pub name: String,
    /// Product category
    pub insurance_type: InsuranceType,
    /// Description shown to clients
    pub description: String,
    /// Per-period refund coverage limit
    pub coverage: Money,
    /// Deductible
    pub deductible: Money,
    /// Base periodic payment amount before surcharges
    pub payment_amount: Money,
    /// Billing period
    pub payment_period: PaymentPeriod,
    /// Whether the product can be sold
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn period_labels() {
        assert_eq!(PaymentPeriod::Monthly.label(), "Monthly");
        assert_eq!(PaymentPeriod::Yearly.label(), "Yearly");
    }

    #[test]
    fn serde_round_trip() {
        let insurance = Insurance {
            id: InsuranceId::new(),
            name: "Total Health".to_string(),
            insurance_type: InsuranceType::Health,
            description: "Full medical coverage".to_string(),
            coverage: Money::new(dec!(100), Currency::USD),
            deductible: Money::new(dec!(20), Currency::USD),
            payment_amount: Money::new(dec!(100), Currency::USD),
            payment_period: PaymentPeriod::Monthly,
            active: true,
        };

        let json = serde_json::to_string(&insurance).unwrap();
        assert!(json.contains("\"MONTHLY\""));
    }
}
