use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{FinanceError, Result};
use crate::scheme::UserScheme;
use crate::types::Transaction;

/// how far an enrollment is towards its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeProgress {
    pub total_paid: Money,
    pub remaining_amount: Money,
    /// percent of the target paid so far; exceeds 100 on overpayment
    pub completion_percentage: Decimal,
    pub days_remaining: u32,
}

/// outstanding amount, never below zero
pub fn calculate_remaining_amount(total_amount: Money, paid_amount: Money) -> Money {
    (total_amount - paid_amount).max(Money::ZERO)
}

/// Progress of `scheme` given every known transaction.
///
/// Only transactions referencing the scheme count. A zero target makes the
/// completion percentage undefined and is reported as an error.
pub fn calculate_scheme_progress(
    scheme: &UserScheme,
    transactions: &[Transaction],
    time_provider: &SafeTimeProvider,
) -> Result<SchemeProgress> {
    let total_paid: Money = transactions
        .iter()
        .filter(|t| t.scheme_id == scheme.id)
        .map(|t| t.amount)
        .sum();

    let completion_percentage = total_paid.percent_of(scheme.total_amount).ok_or_else(|| {
        tracing::warn!(user_scheme_id = %scheme.id, "progress requested for a zero target amount");
        FinanceError::ZeroTargetAmount { scheme_id: scheme.id }
    })?;

    Ok(SchemeProgress {
        total_paid,
        remaining_amount: calculate_remaining_amount(scheme.total_amount, total_paid),
        completion_percentage,
        days_remaining: days_until(time_provider.now(), scheme.maturity_date()),
    })
}

/// whole days left before `maturity`, zero once it has passed
fn days_until(now: DateTime<Utc>, maturity: DateTime<Utc>) -> u32 {
    let days = (maturity - now).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
