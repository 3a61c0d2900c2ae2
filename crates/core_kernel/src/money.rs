//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount with associated currency
///
/// Money uses rust_decimal for precise arithmetic without floating-point
/// errors. Amounts are stored with 4 decimal places internally so that
/// surcharge-adjusted premiums keep sub-cent precision until rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds to the currency's standard decimal places
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp(self.currency.decimal_places()),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Returns the smaller of two amounts in the same currency
    pub fn checked_min(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(if self.amount <= other.amount {
            *self
        } else {
            *other
        })
    }

    /// Multiplies by a scalar (e.g., for surcharge factors)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}
