//! Money arithmetic tests exercised through the public API

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

#[test]
fn addition_and_subtraction_round_trip() {
    let base = Money::new(dec!(110.00), Currency::USD);
    let delta = Money::new(dec!(35.50), Currency::USD);

    let sum = base.checked_add(&delta).unwrap();
    assert_eq!(sum.amount(), dec!(145.50));

    let back = sum.checked_sub(&delta).unwrap();
    assert_eq!(back, base);
}

#[test]
fn subtraction_can_go_negative() {
    // Remaining-coverage arithmetic relies on signed results
    let limit = Money::new(dec!(100), Currency::USD);
    let consumed = Money::new(dec!(130), Currency::USD);

    let remaining = limit.checked_sub(&consumed).unwrap();
    assert!(remaining.is_negative());
    assert_eq!(remaining.amount(), dec!(-30));
}

#[test]
fn multiply_keeps_four_decimal_places() {
    let base = Money::new(dec!(100), Currency::USD);
    let adjusted = base.multiply(dec!(1.10125));

    assert_eq!(adjusted.amount(), dec!(110.1250));
    // round_dp rounds midpoints to even
    assert_eq!(adjusted.round_to_currency().amount(), dec!(110.12));
}

#[test]
fn cross_currency_operations_are_rejected() {
    let usd = Money::new(dec!(10), Currency::USD);
    let eur = Money::new(dec!(10), Currency::EUR);

    assert!(matches!(
        usd.checked_sub(&eur),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
    assert!(matches!(
        usd.checked_min(&eur),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
}

#[test]
fn display_uses_currency_symbol() {
    let m = Money::new(dec!(110), Currency::USD);
    assert_eq!(m.to_string(), "$ 110.00");
}
