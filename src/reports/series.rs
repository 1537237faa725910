use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::reports::SeriesPoint;
use crate::types::{Transaction, User};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Collections per calendar day (UTC) for the `days` days ending today.
///
/// Every day gets a point, zero when nothing was collected. Labels are ISO
/// dates in ascending order.
pub fn group_transactions_by_day(
    transactions: &[Transaction],
    days: u32,
    time_provider: &SafeTimeProvider,
) -> Vec<SeriesPoint> {
    let dates = trailing_dates(time_provider.now().date_naive(), days);
    let Some(&first) = dates.first() else {
        return Vec::new();
    };

    let mut totals = vec![Decimal::ZERO; dates.len()];
    for t in transactions {
        let offset = (t.date.date_naive() - first).num_days();
        if let Some(total) = usize::try_from(offset).ok().and_then(|i| totals.get_mut(i)) {
            *total += t.amount.as_decimal();
        }
    }

    dates
        .into_iter()
        .zip(totals)
        .map(|(date, value)| SeriesPoint {
            label: date.format("%Y-%m-%d").to_string(),
            value,
        })
        .collect()
}

/// `days` consecutive dates ending at `end`, oldest first
fn trailing_dates(end: NaiveDate, days: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(days as usize);
    let mut current = Some(end);
    for _ in 0..days {
        let Some(date) = current else { break };
        dates.push(date);
        current = date.pred_opt();
    }
    dates.reverse();
    dates
}

/// collections per month of `year`, January first
pub fn group_transactions_by_month(transactions: &[Transaction], year: i32) -> Vec<SeriesPoint> {
    let mut totals = [Decimal::ZERO; 12];
    for t in transactions.iter().filter(|t| t.date.year() == year) {
        totals[t.date.month0() as usize] += t.amount.as_decimal();
    }
    monthly_points(totals)
}

/// users created per month of `year`
pub fn user_growth_by_month(users: &[User], year: i32) -> Vec<SeriesPoint> {
    let mut counts = [Decimal::ZERO; 12];
    for u in users.iter().filter(|u| u.created_at.year() == year) {
        counts[u.created_at.month0() as usize] += Decimal::ONE;
    }
    monthly_points(counts)
}

fn monthly_points(values: [Decimal; 12]) -> Vec<SeriesPoint> {
    MONTH_LABELS
        .iter()
        .zip(values)
        .map(|(label, value)| SeriesPoint {
            label: (*label).to_string(),
            value,
        })
        .collect()
}

/// Trailing moving average, same length as the input.
///
/// The first `window - 1` points average over what is available so far.
/// A window of 0 or 1 returns the input unchanged.
pub fn simple_moving_average(values: &[Decimal], window: usize) -> Vec<Decimal> {
    if window <= 1 {
        return values.to_vec();
    }

    let mut result = Vec::with_capacity(values.len());
    let mut sum = Decimal::ZERO;
    for (i, value) in values.iter().enumerate() {
        sum += *value;
        if i >= window {
            sum -= values[i - window];
        }
        let denom = (i + 1).min(window);
        result.push(sum / Decimal::from(denom));
    }
    result
}
