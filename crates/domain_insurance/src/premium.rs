//! Premium calculation
//!
//! The periodic amount a contract bills is the product's base payment amount
//! adjusted by the sum of the client's condition surcharges:
//!
//! ```text
//! amount = base * (1 + sum_percentage / 100)
//! ```
//!
//! The stored and billed amount is exact; only the rendered contract
//! document rounds the percentage sum to 4 decimal places (half-up) before
//! dividing, so the premium shown to the client matches the paper figure.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use core_kernel::Money;

use crate::condition::Condition;

/// Sums the surcharge percentages of the given conditions
///
/// Absent percentages count as 0. An empty list sums to 0.
fn percent_sum(conditions: &[Condition]) -> Decimal {
    conditions
        .iter()
        .map(|c| Decimal::from(c.surcharge()))
        .sum()
}

/// Computes the exact periodic payment amount for a contract
///
/// Monotonically non-decreasing in the surcharge sum; equals `base` when the
/// sum is 0. No premature rounding of the percentage is performed.
pub fn periodic_amount(base: Money, conditions: &[Condition]) -> Money {
    let factor = dec!(1) + percent_sum(conditions) / dec!(100);
    base.multiply(factor)
}

/// Percentage sum as shown in the rendered contract document
///
/// Rounded to 4 decimal places using round-half-up, matching the figure
/// printed next to the adjusted premium.
pub fn document_percent_sum(conditions: &[Condition]) -> Decimal {
    percent_sum(conditions).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Adjusted premium as shown in the rendered contract document
///
/// Uses the 4-dp rounded percentage sum; may differ from [`periodic_amount`]
/// only in sub-cent digits.
pub fn document_adjusted_amount(base: Money, conditions: &[Condition]) -> Money {
    let factor = dec!(1) + document_percent_sum(conditions) / dec!(100);
    base.multiply(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ConditionId, Currency};

    fn condition(percentage: Option<i32>) -> Condition {
        Condition {
            id: ConditionId::new(),
            name: "test".to_string(),
            description: String::new(),
            added_percentage: percentage,
        }
    }

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn empty_conditions_yield_base_amount() {
        assert_eq!(periodic_amount(usd(dec!(100)), &[]), usd(dec!(100)));
    }

    #[test]
    fn single_condition_adds_its_percentage() {
        let amount = periodic_amount(usd(dec!(100)), &[condition(Some(10))]);
        assert_eq!(amount.amount(), dec!(110));
    }

    #[test]
    fn surcharges_accumulate() {
        let conditions = [condition(Some(10)), condition(Some(5)), condition(None)];
        let amount = periodic_amount(usd(dec!(200)), &conditions);
        assert_eq!(amount.amount(), dec!(230));
    }

    #[test]
    fn absent_percentage_counts_as_zero() {
        let amount = periodic_amount(usd(dec!(100)), &[condition(None)]);
        assert_eq!(amount.amount(), dec!(100));
    }

    #[test]
    fn document_sum_is_rounded_to_four_places() {
        // Whole-percent inputs stay exact through the document rounding
        let conditions = [condition(Some(7)), condition(Some(3))];
        assert_eq!(document_percent_sum(&conditions), dec!(10));
        assert_eq!(
            document_adjusted_amount(usd(dec!(100)), &conditions),
            periodic_amount(usd(dec!(100)), &conditions)
        );
    }
}
