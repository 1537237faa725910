use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{FinanceError, Result};
use crate::interest::{calculate_interest, InterestCalculation, InterestCalculator, DAYS_IN_YEAR};

/// simple-interest engine over calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleInterestEngine {
    pub year_basis: u32,
}

impl Default for SimpleInterestEngine {
    fn default() -> Self {
        Self {
            year_basis: DAYS_IN_YEAR,
        }
    }
}

impl SimpleInterestEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// whole days between two instants
    pub fn calculate_days(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u32> {
        let days = (end - start).num_days();
        u32::try_from(days).map_err(|_| FinanceError::InvalidDate {
            message: format!("end {end} precedes start {start}"),
        })
    }

    fn interest_for(&self, principal: Money, rate: Rate, days: u32) -> Money {
        if self.year_basis == DAYS_IN_YEAR {
            return calculate_interest(principal, rate, Decimal::from(days));
        }
        let interest = principal.as_decimal() * rate.as_decimal() * Decimal::from(days)
            / Decimal::from(self.year_basis);
        Money::from_decimal(interest)
    }
}

impl InterestCalculator for SimpleInterestEngine {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<InterestCalculation> {
        let days = self.calculate_days(start_date, end_date)?;
        let interest = self.interest_for(principal, rate, days);

        Ok(InterestCalculation {
            interest_amount: interest,
            daily_rate: self.get_daily_rate(rate),
            days,
            principal_base: principal,
            maturity_amount: principal + interest,
        })
    }

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate {
        Rate::from_decimal(annual_rate.as_decimal() / Decimal::from(self.year_basis))
    }
}
