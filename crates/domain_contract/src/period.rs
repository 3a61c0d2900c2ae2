//! Billing-period resolution
//!
//! Payments are bucketed by calendar period relative to the contract start
//! date. The resolver counts the whole billing periods elapsed between the
//! start date and the evaluation date, steps back one completed period when
//! at least one has elapsed, and projects the start date forward by the
//! adjusted count. The calendar year and month (or year alone, for yearly
//! billing) of that target date form the bucket key.
//!
//! Month arithmetic follows civil-calendar conventions: adding a month to
//! Jan 31 clamps to the last day of February, and a whole month has elapsed
//! only once the day-of-month of the end date has reached the day-of-month
//! of the start date.

use chrono::{Datelike, Months, NaiveDate};
use domain_insurance::PaymentPeriod;

use crate::payment::Payment;

/// Calendar bucket a payment is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    /// A specific calendar month
    Month { year: i32, month: u32 },
    /// A specific calendar year
    Year { year: i32 },
}

impl PeriodKey {
    /// True when `date` falls inside this bucket
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            PeriodKey::Month { year, month } => date.year() == year && date.month() == month,
            PeriodKey::Year { year } => date.year() == year,
        }
    }
}

/// Whole calendar months elapsed from `start` to `end`
///
/// Partial months do not count: the day-of-month of `end` must reach the
/// day-of-month of `start` before the month is complete, so a month that
/// starts on the 31st only completes on another 31st. Negative when `end`
/// precedes `start`.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return -whole_months_between(end, start);
    }
    let raw = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    if end.day() < start.day() {
        raw - 1
    } else {
        raw
    }
}

/// Whole calendar years elapsed from `start` to `end`
pub fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i64 {
    whole_months_between(start, end) / 12
}

/// Adds `months` calendar months to `date`, clamping to month end
///
/// Out-of-range results (beyond chrono's representable dates) fall back to
/// the input date; contract dates never reach that range.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let result = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new((-months) as u32))
    };
    result.unwrap_or(date)
}

/// Resolves the billing-period bucket active at `today`
///
/// Counts whole periods elapsed since `start`, steps back one completed
/// period when at least one has elapsed, and projects `start` forward by the
/// adjusted count. The projection's calendar month (or year) is the bucket.
/// A negative elapsed count (evaluation date before `start`) is carried
/// through unchanged and projects backwards.
pub fn resolve_period_bucket(start: NaiveDate, today: NaiveDate, period: PaymentPeriod) -> PeriodKey {
    match period {
        PaymentPeriod::Monthly => {
            let mut elapsed = whole_months_between(start, today);
            if elapsed > 0 {
                elapsed -= 1;
            }
            let target = add_months(start, elapsed);
            PeriodKey::Month {
                year: target.year(),
                month: target.month(),
            }
        }
        PaymentPeriod::Yearly => {
            let mut elapsed = whole_years_between(start, today);
            if elapsed > 0 {
                elapsed -= 1;
            }
            let target = add_months(start, elapsed * 12);
            PeriodKey::Year {
                year: target.year(),
            }
        }
    }
}

/// Finds the payment covering the bucket, first match in insertion order
pub fn find_current_payment(payments: &[Payment], bucket: PeriodKey) -> Option<&Payment> {
    payments.iter().find(|payment| bucket.contains(payment.date))
}

/// Index variant of [`find_current_payment`], for in-place replacement
pub fn find_current_payment_index(payments: &[Payment], bucket: PeriodKey) -> Option<usize> {
    payments
        .iter()
        .position(|payment| bucket.contains(payment.date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn partial_month_does_not_count() {
        assert_eq!(whole_months_between(date(2026, 1, 15), date(2026, 2, 14)), 0);
        assert_eq!(whole_months_between(date(2026, 1, 15), date(2026, 2, 15)), 1);
    }

    #[test]
    fn month_end_starts_need_the_same_day_to_complete() {
        // Jan 31 to Feb 28 falls short: the 28th never reaches the 31st
        assert_eq!(whole_months_between(date(2026, 1, 31), date(2026, 2, 28)), 0);
        assert_eq!(whole_months_between(date(2026, 1, 31), date(2026, 3, 31)), 2);
        assert_eq!(whole_months_between(date(2026, 1, 31), date(2026, 3, 30)), 1);
    }

    #[test]
    fn negative_span_is_antisymmetric() {
        assert_eq!(whole_months_between(date(2026, 3, 15), date(2026, 1, 15)), -2);
        assert_eq!(whole_months_between(date(2026, 3, 15), date(2026, 1, 16)), -1);
        // the partial month truncates toward zero in both directions
        assert_eq!(whole_months_between(date(2026, 2, 28), date(2026, 1, 31)), 0);
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(add_months(date(2026, 1, 31), 3), date(2026, 4, 30));
        assert_eq!(add_months(date(2026, 3, 15), -2), date(2026, 1, 15));
    }

    #[test]
    fn first_period_bucket_is_the_start_month() {
        let key = resolve_period_bucket(date(2026, 1, 10), date(2026, 1, 25), PaymentPeriod::Monthly);
        assert_eq!(key, PeriodKey::Month { year: 2026, month: 1 });
    }

    #[test]
    fn completed_period_steps_back_one() {
        // One whole month elapsed: adjusted count is zero, bucket stays on
        // the start month until the second period completes.
        let key = resolve_period_bucket(date(2026, 1, 10), date(2026, 2, 10), PaymentPeriod::Monthly);
        assert_eq!(key, PeriodKey::Month { year: 2026, month: 1 });

        let key = resolve_period_bucket(date(2026, 1, 10), date(2026, 3, 10), PaymentPeriod::Monthly);
        assert_eq!(key, PeriodKey::Month { year: 2026, month: 2 });
    }

    #[test]
    fn evaluation_before_start_projects_backwards() {
        let key = resolve_period_bucket(date(2026, 5, 1), date(2026, 3, 1), PaymentPeriod::Monthly);
        assert_eq!(key, PeriodKey::Month { year: 2026, month: 3 });
    }

    #[test]
    fn yearly_buckets_ignore_months() {
        let key = resolve_period_bucket(date(2025, 6, 1), date(2026, 1, 1), PaymentPeriod::Yearly);
        assert_eq!(key, PeriodKey::Year { year: 2025 });

        let key = resolve_period_bucket(date(2024, 6, 1), date(2026, 7, 1), PaymentPeriod::Yearly);
        assert_eq!(key, PeriodKey::Year { year: 2025 });
    }
}
