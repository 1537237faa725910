//! serialization support for computed results

use chrono::{DateTime, Datelike, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::calculate_daily_interest;
use crate::reports::{
    amount_by_scheme_type, filter_transactions_by_period, group_transactions_by_month, payment_mode_distribution,
    user_growth_by_month, DailyTrend, Distribution, ReportPeriod, ReportStats, SeriesPoint, TransactionFilter,
};
use crate::scheme::{calculate_scheme_progress, SchemeProgress, UserScheme};
use crate::types::{SchemeStatus, Transaction, User, UserId, UserSchemeId};

/// serializable view of one enrollment and its progress
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemeProgressView {
    pub id: UserSchemeId,
    pub user_id: UserId,
    pub scheme_name: String,
    pub status: SchemeStatus,
    pub start_date: DateTime<Utc>,
    pub maturity_date: DateTime<Utc>,
    pub total_amount: Money,
    pub current_balance: Money,
    pub interest_rate: Rate,
    pub accrued_interest: Money,
    pub maturity_amount: Money,
    pub progress: SchemeProgress,
}

impl SchemeProgressView {
    pub fn from_scheme(
        scheme: &UserScheme,
        transactions: &[Transaction],
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        Ok(SchemeProgressView {
            id: scheme.id,
            user_id: scheme.user_id,
            scheme_name: scheme.scheme.name.clone(),
            status: scheme.status,
            start_date: scheme.start_date,
            maturity_date: scheme.maturity_date(),
            total_amount: scheme.total_amount,
            current_balance: scheme.current_balance,
            interest_rate: scheme.interest_rate,
            accrued_interest: calculate_daily_interest(scheme, time_provider.now()),
            maturity_amount: scheme.maturity_amount(),
            progress: calculate_scheme_progress(scheme, transactions, time_provider)?,
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// everything the reports page renders for one period
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportView {
    pub period: ReportPeriod,
    pub generated_at: DateTime<Utc>,
    pub stats: ReportStats,
    pub payment_modes: Distribution,
    pub amount_by_scheme: Distribution,
    pub monthly_collections: Vec<SeriesPoint>,
    pub user_growth: Vec<SeriesPoint>,
    pub daily_trend: DailyTrend,
}

impl ReportView {
    /// Period and filter narrow the statistics and distributions; the yearly
    /// and daily series always cover every transaction.
    pub fn build(
        config: &LedgerConfig,
        users: &[User],
        user_schemes: &[UserScheme],
        transactions: &[Transaction],
        period: ReportPeriod,
        filter: &TransactionFilter,
        time_provider: &SafeTimeProvider,
    ) -> Self {
        let now = time_provider.now();
        let in_period = filter_transactions_by_period(transactions, period, time_provider);
        let selected = filter.apply(&in_period, user_schemes);
        let year = now.year();

        ReportView {
            period,
            generated_at: now,
            stats: ReportStats::from_transactions(&selected),
            payment_modes: payment_mode_distribution(&selected),
            amount_by_scheme: amount_by_scheme_type(&selected, user_schemes),
            monthly_collections: group_transactions_by_month(transactions, year),
            user_growth: user_growth_by_month(users, year),
            daily_trend: DailyTrend::compute(transactions, &config.reports, time_provider),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
