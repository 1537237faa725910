pub mod distribution;
pub mod series;
pub mod summary;

use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::types::Transaction;

pub use distribution::{amount_by_scheme_type, payment_mode_distribution, UNKNOWN_LABEL};
pub use series::{
    group_transactions_by_day, group_transactions_by_month, simple_moving_average, user_growth_by_month,
    MONTH_LABELS,
};
pub use summary::{
    daily_summary, filter_transactions_by_period, scheme_summary, DailySummary, DashboardStats, ReportPeriod,
    ReportStats, SchemeSummaryRow, TransactionFilter,
};

/// one labelled point of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Decimal,
}

/// parallel label/value lists, the shape pie and bar charts consume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl Distribution {
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|i| self.values.get(i).copied())
    }

    pub fn total(&self) -> Decimal {
        self.values.iter().copied().sum()
    }
}

/// daily collections with a smoothed companion series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub points: Vec<SeriesPoint>,
    pub moving_average: Vec<Decimal>,
}

impl DailyTrend {
    pub fn compute(transactions: &[Transaction], config: &ReportConfig, time_provider: &SafeTimeProvider) -> Self {
        let points = group_transactions_by_day(transactions, config.day_window, time_provider);
        let values: Vec<Decimal> = points.iter().map(|p| p.value).collect();
        let moving_average = simple_moving_average(&values, config.moving_average_window);
        Self { points, moving_average }
    }
}
