//! Test data builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::NaiveDate;
use core_kernel::{ClientId, ConditionId, Currency, InsuranceId, Money};
use domain_contract::ClientProfile;
use domain_insurance::{Condition, Insurance, InsuranceType, PaymentPeriod};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Shorthand for USD amounts
pub fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

/// Shorthand for civil dates in tests
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A risk condition with the given surcharge
pub fn condition(name: &str, added_percentage: Option<i32>) -> Condition {
    Condition {
        id: ConditionId::new(),
        name: name.to_string(),
        description: format!("{name} condition"),
        added_percentage,
    }
}

/// Builder for insurance products
pub struct InsuranceBuilder {
    id: InsuranceId,
    name: String,
    insurance_type: InsuranceType,
    coverage: Money,
    deductible: Money,
    payment_amount: Money,
    payment_period: PaymentPeriod,
}

impl Default for InsuranceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InsuranceBuilder {
    pub fn new() -> Self {
        Self {
            id: InsuranceId::new(),
            name: "Full Health".to_string(),
            insurance_type: InsuranceType::Health,
            coverage: usd(dec!(100)),
            deductible: usd(dec!(20)),
            payment_amount: usd(dec!(100)),
            payment_period: PaymentPeriod::Monthly,
        }
    }

    pub fn with_id(mut self, id: InsuranceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_coverage(mut self, coverage: Money) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_payment_amount(mut self, amount: Money) -> Self {
        self.payment_amount = amount;
        self
    }

    pub fn with_payment_period(mut self, period: PaymentPeriod) -> Self {
        self.payment_period = period;
        self
    }

    pub fn life(mut self) -> Self {
        self.insurance_type = InsuranceType::Life;
        self
    }

    pub fn build(self) -> Insurance {
        Insurance {
            id: self.id,
            name: self.name,
            insurance_type: self.insurance_type,
            description: "test insurance product".to_string(),
            coverage: self.coverage,
            deductible: self.deductible,
            payment_amount: self.payment_amount,
            payment_period: self.payment_period,
            active: true,
        }
    }
}

/// Builder for client profiles
pub struct ClientProfileBuilder {
    id: ClientId,
    first_name: String,
    last_name: String,
    email: String,
    conditions: Vec<Condition>,
    has_documents: bool,
}

impl Default for ClientProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientProfileBuilder {
    pub fn new() -> Self {
        Self {
            id: ClientId::new(),
            first_name: "Maria".to_string(),
            last_name: "Andrade".to_string(),
            email: "maria.andrade@example.com".to_string(),
            conditions: Vec::new(),
            has_documents: true,
        }
    }

    pub fn with_id(mut self, id: ClientId) -> Self {
        self.id = id;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn without_documents(mut self) -> Self {
        self.has_documents = false;
        self
    }

    pub fn build(self) -> ClientProfile {
        ClientProfile {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            conditions: self.conditions,
            has_documents: self.has_documents,
        }
    }
}
