//! Coverage ledger
//!
//! Decides how much of a new claim the policy's per-period coverage limit
//! can still absorb. The accounting-period boundary is the contract's most
//! recent payment date: every refund request in the system dated on or
//! after that day counts against the budget. A contract without payments
//! has no boundary and the whole refund history counts.
//!
//! The arithmetic here is pure; the service queries the refund store for
//! the consumed requests and holds the ledger lock across compute and
//! persist so two claims cannot both observe the same remaining budget.

use core_kernel::Money;

use crate::error::RefundError;
use crate::refund::RefundRequest;

/// Sums the covered amounts already recorded against the budget
///
/// Rejected requests participate with their zeroed covered amount, so they
/// weigh nothing without needing special-casing here.
pub fn consumed_total(requests: &[RefundRequest], currency_zero: Money) -> Result<Money, RefundError> {
    let mut total = currency_zero;
    for request in requests {
        total = total.checked_add(&request.covered_amount)?;
    }
    Ok(total)
}

/// Computes the covered amount the budget grants a new claim
///
/// Remaining budget is the coverage limit minus what the period already
/// consumed. A non-positive remainder is a conflict and no refund may be
/// created; otherwise the claim is covered up to the smaller of what was
/// paid and what remains.
pub fn covered_amount(
    coverage_limit: Money,
    consumed: Money,
    paid: Money,
) -> Result<Money, RefundError> {
    let remaining = coverage_limit.checked_sub(&consumed)?;
    if remaining.is_zero() || remaining.is_negative() {
        return Err(RefundError::conflict(
            "coverage is exhausted for the current period",
        ));
    }
    Ok(paid.checked_min(&remaining)?)
}
