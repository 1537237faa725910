pub mod simple;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::scheme::UserScheme;

pub use simple::SimpleInterestEngine;

/// day basis for annual rates
pub const DAYS_IN_YEAR: u32 = 365;

/// interest calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    pub days: u32,
    pub principal_base: Money,
    pub maturity_amount: Money,
}

/// trait for interest calculations over a date range
pub trait InterestCalculator {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<InterestCalculation>;

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate;
}

/// Simple interest: `principal * rate * days / 365`, no compounding.
///
/// `days` may be fractional. Nothing is validated here: a negative principal
/// or day count yields a negative amount.
pub fn calculate_interest(principal: Money, annual_rate: Rate, days: Decimal) -> Money {
    let interest = principal.as_decimal() * annual_rate.as_decimal() * days / Decimal::from(DAYS_IN_YEAR);
    Money::from_decimal(interest)
}

/// principal plus simple interest for the period
pub fn calculate_maturity_amount(principal: Money, annual_rate: Rate, days: Decimal) -> Money {
    principal + calculate_interest(principal, annual_rate, days)
}

/// Interest earned on the enrollment's current balance since it started.
///
/// Elapsed time is counted in whole days. An `as_of` before the start date
/// counts as zero days.
pub fn calculate_daily_interest(scheme: &UserScheme, as_of: DateTime<Utc>) -> Money {
    let days = elapsed_days(scheme.start_date, as_of);
    calculate_interest(scheme.current_balance, scheme.interest_rate, Decimal::from(days))
}

/// interest recorded on a daily entry: one day on the entered amount
pub fn entry_interest(amount: Money, scheme: &UserScheme) -> Money {
    calculate_interest(amount, scheme.interest_rate, Decimal::ONE)
}

/// whole days from `start` to `end`, clamped at zero
fn elapsed_days(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let days = (end - start).num_days();
    if days < 0 {
        tracing::debug!(%start, %end, days, "end precedes start, counting zero elapsed days");
        return 0;
    }
    u32::try_from(days).unwrap_or(u32::MAX)
}
