//! Premium calculator tests against the public crate API

use core_kernel::{ConditionId, Currency, Money};
use domain_insurance::{document_adjusted_amount, periodic_amount, Condition};
use rust_decimal_macros::dec;

fn condition(name: &str, percentage: Option<i32>) -> Condition {
    Condition {
        id: ConditionId::new(),
        name: name.to_string(),
        description: String::new(),
        added_percentage: percentage,
    }
}

#[test]
fn ten_percent_condition_on_hundred_base() {
    let base = Money::new(dec!(100), Currency::USD);
    let conditions = [condition("Smoker", Some(10))];

    assert_eq!(periodic_amount(base, &conditions).amount(), dec!(110));
}

#[test]
fn mixed_present_and_absent_percentages() {
    let base = Money::new(dec!(80), Currency::USD);
    let conditions = [
        condition("Smoker", Some(10)),
        condition("Asthma", None),
        condition("Hypertension", Some(15)),
    ];

    // 80 * 1.25
    assert_eq!(periodic_amount(base, &conditions).amount(), dec!(100));
}

#[test]
fn document_amount_matches_exact_amount_for_whole_percentages() {
    let base = Money::new(dec!(199.99), Currency::USD);
    let conditions = [condition("Smoker", Some(10)), condition("Diver", Some(7))];

    assert_eq!(
        document_adjusted_amount(base, &conditions),
        periodic_amount(base, &conditions)
    );
}
