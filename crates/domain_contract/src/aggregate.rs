//! Contract aggregate and workflow transitions
//!
//! The contract owns its beneficiaries, payments, and step gates; the client
//! and the insurance product are held as identifiers and resolved through
//! the collaborator ports. All workflow mutation goes through the methods
//! here so the status, active flag, and gate invariants hold at every call
//! boundary.

use chrono::NaiveDate;
use core_kernel::{BeneficiaryId, ClientId, ContractId, InsuranceId, Money};
use domain_insurance::PaymentPeriod;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::payment::Payment;
use crate::period::{add_months, find_current_payment_index, resolve_period_bucket, PeriodKey};
use crate::steps::{ContractStep, StepStatuses};

/// Contract lifecycle status
///
/// Invariant: the active flag is true exactly when the status is Active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Pending,
    Active,
    Cancelled,
    RejectedByClient,
    Expired,
}

/// A person entitled to benefits under a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: BeneficiaryId,
    pub first_name: String,
    pub last_name: String,
    pub identification_number: String,
    pub phone_number: String,
    pub relationship: String,
}

/// An insurance contract between a client and a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub client_id: ClientId,
    pub insurance_id: InsuranceId,
    /// Billing-cycle anchor; re-set to the activation date on approval
    pub start_date: Option<NaiveDate>,
    pub status: ContractStatus,
    /// True exactly when status is Active
    pub active: bool,
    /// Periodic premium including condition surcharges
    pub total_payment_amount: Money,
    pub beneficiaries: Vec<Beneficiary>,
    pub payments: Vec<Payment>,
    pub steps: StepStatuses,
}

impl Contract {
    /// Creates a pending contract with the initial gate state
    pub fn create(
        client_id: ClientId,
        insurance_id: InsuranceId,
        total_payment_amount: Money,
        beneficiaries: Vec<Beneficiary>,
        start_date: Option<NaiveDate>,
        client_has_documents: bool,
    ) -> Self {
        Self {
            id: ContractId::new_v7(),
            client_id,
            insurance_id,
            start_date,
            status: ContractStatus::Pending,
            active: false,
            total_payment_amount,
            beneficiaries,
            payments: Vec::new(),
            steps: StepStatuses::initial(client_has_documents),
        }
    }

    /// Marks the uploaded documents as approved
    pub fn approve_documents(&mut self) {
        self.steps.set(ContractStep::DocumentApproval, true);
    }

    /// Resets the document approval gate; the client must re-upload
    pub fn reject_documents(&mut self) {
        self.steps.set(ContractStep::DocumentApproval, false);
    }

    /// Marks the first payment as recognized
    pub fn approve_payment(&mut self) {
        self.steps.set(ContractStep::PaymentApproval, true);
    }

    /// Grants the client approval and activates the contract
    ///
    /// Fails with a validation error and leaves the contract untouched when
    /// any other gate is still open. On success the start date is re-anchored
    /// to `today`, which becomes the billing-cycle anchor.
    pub fn approve(&mut self, today: NaiveDate) -> Result<(), ContractError> {
        if !self.steps.prerequisites_complete() {
            return Err(ContractError::validation(
                "cannot approve contract, prerequisite steps are incomplete",
            ));
        }
        self.steps.set(ContractStep::ClientApproval, true);
        self.status = ContractStatus::Active;
        self.active = true;
        self.start_date = Some(today);
        Ok(())
    }

    /// Resolves the billing bucket active at `today`, if a start date is set
    pub fn current_bucket(&self, period: PaymentPeriod, today: NaiveDate) -> Option<PeriodKey> {
        self.start_date
            .map(|start| resolve_period_bucket(start, today, period))
    }

    /// Inserts or replaces the payment for the billing period active at `today`
    ///
    /// A payment already in the current bucket is replaced in place; otherwise
    /// the payment is appended. Without a start date there is no bucket and
    /// the payment is always appended. Returns the stored payment.
    pub fn upsert_current_payment(
        &mut self,
        period: PaymentPeriod,
        today: NaiveDate,
        payment: Payment,
    ) -> &Payment {
        let index = match self
            .current_bucket(period, today)
            .and_then(|bucket| find_current_payment_index(&self.payments, bucket))
        {
            Some(index) => {
                self.payments[index] = payment;
                index
            }
            None => {
                self.payments.push(payment);
                self.payments.len() - 1
            }
        };
        &self.payments[index]
    }

    /// Most recent payment date across all payments
    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.payments.iter().map(|payment| payment.date).max()
    }

    /// Estimated end of the current billing cycle: start plus one period
    pub fn estimated_end_date(&self, period: PaymentPeriod) -> Option<NaiveDate> {
        let months = match period {
            PaymentPeriod::Monthly => 1,
            PaymentPeriod::Yearly => 12,
        };
        self.start_date.map(|start| add_months(start, months))
    }

    /// True when the payment gate is open or the first cycle elapsed unpaid
    ///
    /// Contracts without a start date are never reported unpaid, whatever
    /// their gate state.
    pub fn is_unpaid(&self, period: PaymentPeriod, today: NaiveDate) -> bool {
        let Some(end) = self.estimated_end_date(period) else {
            return false;
        };
        let payment_gate_open = !self.steps.get(ContractStep::PaymentApproval);
        payment_gate_open || end < today
    }

    /// True when the current cycle ends within the next `window_days` days
    ///
    /// Only Active and Pending contracts with a start date qualify; the
    /// window is inclusive on both ends and never reaches into the past.
    pub fn is_expiring_soon(&self, period: PaymentPeriod, today: NaiveDate, window_days: u32) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(end) = self.estimated_end_date(period) else {
            return false;
        };
        let limit = today + chrono::Days::new(u64::from(window_days));
        end >= today && end <= limit
    }

    /// True when the current cycle ended strictly before `today`
    pub fn is_expired(&self, period: PaymentPeriod, today: NaiveDate) -> bool {
        if !self.is_live() {
            return false;
        }
        match self.estimated_end_date(period) {
            Some(end) => end < today,
            None => false,
        }
    }

    /// True when the status is Pending, regardless of gate completion
    pub fn is_pending(&self) -> bool {
        self.status == ContractStatus::Pending
    }

    fn is_live(&self) -> bool {
        matches!(self.status, ContractStatus::Active | ContractStatus::Pending)
    }
}
