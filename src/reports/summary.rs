use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Scheme;
use crate::decimal::{Money, Rate};
use crate::scheme::{calculate_remaining_amount, UserScheme};
use crate::types::{EntryType, PaymentMode, SchemeId, SchemeStatus, Transaction, User, UserId};

/// reporting window counted back from now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPeriod {
    /// the last 7 x 24 hours
    Weekly,
    /// since the first of the current month
    Monthly,
    /// since january 1 of the current year
    Yearly,
}

impl ReportPeriod {
    /// first instant included in the period
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let first = match self {
            ReportPeriod::Weekly => return now - Duration::days(7),
            ReportPeriod::Monthly => today.with_day(1),
            ReportPeriod::Yearly => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };
        first
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt))
            .unwrap_or(now)
    }
}

/// transactions dated within `period` of now
pub fn filter_transactions_by_period(
    transactions: &[Transaction],
    period: ReportPeriod,
    time_provider: &SafeTimeProvider,
) -> Vec<Transaction> {
    let start = period.start(time_provider.now());
    transactions.iter().filter(|t| t.date >= start).cloned().collect()
}

/// optional constraints narrowing a report; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
    pub payment_mode: Option<PaymentMode>,
    pub user_id: Option<UserId>,
    /// scheme template the transaction's enrollment belongs to
    pub scheme_id: Option<SchemeId>,
    /// calendar month, 1 to 12
    pub month: Option<u32>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction, user_schemes: &[UserScheme]) -> bool {
        if self.min_amount.is_some_and(|min| t.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| t.amount > max) {
            return false;
        }
        if self.payment_mode.is_some_and(|mode| t.payment_mode != mode) {
            return false;
        }
        if self.user_id.is_some_and(|user| t.user_id != user) {
            return false;
        }
        if let Some(scheme_id) = &self.scheme_id {
            // unknown enrollments cannot match a scheme constraint
            let enrolled = user_schemes.iter().find(|s| s.id == t.scheme_id);
            if enrolled.map_or(true, |s| &s.scheme.id != scheme_id) {
                return false;
            }
        }
        if self.month.is_some_and(|month| t.date.month() != month) {
            return false;
        }
        true
    }

    pub fn apply(&self, transactions: &[Transaction], user_schemes: &[UserScheme]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t, user_schemes))
            .cloned()
            .collect()
    }
}

/// headline figures for a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_transactions: usize,
    pub total_amount: Money,
    /// zero for an empty set
    pub average_amount: Money,
    pub unique_customers: usize,
    pub total_interest: Money,
    pub cash_payments: usize,
    pub online_payments: usize,
}

impl ReportStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_amount: Money = transactions.iter().map(|t| t.amount).sum();
        let average_amount = if transactions.is_empty() {
            Money::ZERO
        } else {
            total_amount / Decimal::from(transactions.len())
        };
        let customers: HashSet<UserId> = transactions.iter().map(|t| t.user_id).collect();
        let online_payments = transactions.iter().filter(|t| t.payment_mode.is_online()).count();

        Self {
            total_transactions: transactions.len(),
            total_amount,
            average_amount,
            unique_customers: customers.len(),
            total_interest: transactions.iter().map(|t| t.interest).sum(),
            cash_payments: transactions.len() - online_payments,
            online_payments,
        }
    }
}

/// credit and debit totals of one customer's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_credit: Money,
    pub total_debit: Money,
    /// credit minus debit
    pub balance: Money,
    pub count: usize,
    pub entries: Vec<Transaction>,
}

/// Ledger summary of `user_id` over an optional date range.
///
/// Both bounds are inclusive calendar days (UTC): `start` from its first
/// instant, `end` through its last. No match gives an all-zero summary.
pub fn daily_summary(
    transactions: &[Transaction],
    user_id: UserId,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DailySummary {
    let entries: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.user_id == user_id)
        .filter(|t| {
            let day = t.date.date_naive();
            start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
        })
        .cloned()
        .collect();

    let total_of = |kind: EntryType| -> Money {
        entries
            .iter()
            .filter(|t| t.entry_type == kind)
            .map(|t| t.amount)
            .sum()
    };
    let total_credit = total_of(EntryType::Credit);
    let total_debit = total_of(EntryType::Debit);

    DailySummary {
        total_credit,
        total_debit,
        balance: total_credit - total_debit,
        count: entries.len(),
        entries,
    }
}

/// one row of the per-scheme summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeSummaryRow {
    pub scheme_id: SchemeId,
    pub name: String,
    pub enrollments: usize,
    pub total_collected: Money,
    /// mean daily amount over enrollments that set one
    pub average_daily_amount: Money,
    pub interest_rate: Rate,
}

/// enrollments and collections for every scheme template
pub fn scheme_summary(
    schemes: &[Scheme],
    user_schemes: &[UserScheme],
    transactions: &[Transaction],
) -> Vec<SchemeSummaryRow> {
    schemes
        .iter()
        .map(|scheme| {
            let enrolled: Vec<&UserScheme> = user_schemes.iter().filter(|s| s.scheme.id == scheme.id).collect();
            let ids: HashSet<_> = enrolled.iter().map(|s| s.id).collect();
            let total_collected: Money = transactions
                .iter()
                .filter(|t| ids.contains(&t.scheme_id))
                .map(|t| t.amount)
                .sum();

            let daily: Vec<Money> = enrolled.iter().filter_map(|s| s.daily_amount).collect();
            let average_daily_amount = if daily.is_empty() {
                Money::ZERO
            } else {
                daily.iter().sum::<Money>() / Decimal::from(daily.len())
            };

            SchemeSummaryRow {
                scheme_id: scheme.id.clone(),
                name: scheme.name.clone(),
                enrollments: enrolled.len(),
                total_collected,
                average_daily_amount,
                interest_rate: scheme.interest_rate,
            }
        })
        .collect()
}

/// figures shown on the dashboard landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_customers: usize,
    pub active_schemes: usize,
    pub total_investment: Money,
    /// remaining target amount across active enrollments
    pub pending_dues: Money,
    pub completed_cycles: usize,
    pub today_collection: Money,
    /// percent change of this month's collection over last month's;
    /// `None` when last month collected nothing
    pub monthly_growth: Option<Decimal>,
}

impl DashboardStats {
    pub fn compute(
        users: &[User],
        user_schemes: &[UserScheme],
        transactions: &[Transaction],
        time_provider: &SafeTimeProvider,
    ) -> Self {
        let now = time_provider.now();
        let today = now.date_naive();

        let paid_into = |scheme: &UserScheme| -> Money {
            transactions
                .iter()
                .filter(|t| t.scheme_id == scheme.id)
                .map(|t| t.amount)
                .sum()
        };
        let pending_dues: Money = user_schemes
            .iter()
            .filter(|s| s.is_active())
            .map(|s| calculate_remaining_amount(s.total_amount, paid_into(s)))
            .sum();

        let this_month = month_key(today);
        let last_month = previous_month(this_month);
        let collected_in = |key: (i32, u32)| -> Money {
            transactions
                .iter()
                .filter(|t| month_key(t.date.date_naive()) == key)
                .map(|t| t.amount)
                .sum()
        };
        let current = collected_in(this_month);
        let previous = collected_in(last_month);
        let monthly_growth = (current - previous)
            .percent_of(previous)
            .map(|p| p.round_dp(2));

        Self {
            total_customers: users.iter().filter(|u| u.is_active).count(),
            active_schemes: user_schemes.iter().filter(|s| s.is_active()).count(),
            total_investment: transactions.iter().map(|t| t.amount).sum(),
            pending_dues,
            completed_cycles: user_schemes
                .iter()
                .filter(|s| s.status == SchemeStatus::Completed)
                .count(),
            today_collection: transactions
                .iter()
                .filter(|t| t.date.date_naive() == today)
                .map(|t| t.amount)
                .sum(),
            monthly_growth,
        }
    }
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::UserSchemeBuilder;
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn clock() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()))
    }

    fn tx(user: UserId, scheme: &UserScheme, amount: i64, date: DateTime<Utc>, mode: PaymentMode) -> Transaction {
        Transaction::new(user, scheme.id, Money::from_major(amount), date, mode)
    }

    #[test]
    fn test_period_starts() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        assert_eq!(ReportPeriod::Weekly.start(now), Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap());
        assert_eq!(ReportPeriod::Monthly.start(now), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(ReportPeriod::Yearly.start(now), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_filter_by_period() {
        let time = clock();
        let scheme = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let user = scheme.user_id;
        let transactions = vec![
            tx(user, &scheme, 1, Utc.with_ymd_and_hms(2024, 3, 19, 0, 0, 0).unwrap(), PaymentMode::Cash),
            tx(user, &scheme, 2, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(), PaymentMode::Cash),
            tx(user, &scheme, 3, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(), PaymentMode::Cash),
            tx(user, &scheme, 4, Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap(), PaymentMode::Cash),
        ];

        assert_eq!(filter_transactions_by_period(&transactions, ReportPeriod::Weekly, &time).len(), 1);
        assert_eq!(filter_transactions_by_period(&transactions, ReportPeriod::Monthly, &time).len(), 2);
        assert_eq!(filter_transactions_by_period(&transactions, ReportPeriod::Yearly, &time).len(), 3);
    }

    #[test]
    fn test_transaction_filter() {
        let time = clock();
        let daily = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let weekly = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::weekly_saver()).build(&time).unwrap();
        let (asha, ravi) = (daily.user_id, weekly.user_id);
        let march = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 5, 0, 0, 0).unwrap();
        let transactions = vec![
            tx(asha, &daily, 100, march, PaymentMode::Cash),
            tx(asha, &daily, 900, feb, PaymentMode::Card),
            tx(ravi, &weekly, 500, march, PaymentMode::MobileWallet),
        ];
        let schemes = vec![daily, weekly];

        assert_eq!(TransactionFilter::default().apply(&transactions, &schemes).len(), 3);

        let filter = TransactionFilter {
            min_amount: Some(Money::from_major(200)),
            ..Default::default()
        };
        assert_eq!(filter.apply(&transactions, &schemes).len(), 2);

        let filter = TransactionFilter {
            user_id: Some(asha),
            month: Some(3),
            ..Default::default()
        };
        let matched = filter.apply(&transactions, &schemes);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].amount, Money::from_major(100));

        let filter = TransactionFilter {
            scheme_id: Some("weekly-saver".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&transactions, &schemes).len(), 1);
        // without the enrollment list nothing can match a scheme constraint
        assert!(filter.apply(&transactions, &[]).is_empty());

        let filter = TransactionFilter {
            payment_mode: Some(PaymentMode::Card),
            max_amount: Some(Money::from_major(800)),
            ..Default::default()
        };
        assert!(filter.apply(&transactions, &schemes).is_empty());
    }

    #[test]
    fn test_report_stats() {
        let time = clock();
        let scheme = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let now = time.now();
        let transactions = vec![
            tx(a, &scheme, 100, now, PaymentMode::Cash).with_interest(Money::from_minor(25)),
            tx(a, &scheme, 200, now, PaymentMode::Card).with_interest(Money::from_minor(50)),
            tx(b, &scheme, 300, now, PaymentMode::BankTransfer),
        ];

        let stats = ReportStats::from_transactions(&transactions);
        assert_eq!(stats.total_transactions, 3);
        assert_eq!(stats.total_amount, Money::from_major(600));
        assert_eq!(stats.average_amount, Money::from_major(200));
        assert_eq!(stats.unique_customers, 2);
        assert_eq!(stats.total_interest, Money::from_minor(75));
        assert_eq!(stats.cash_payments, 1);
        assert_eq!(stats.online_payments, 2);

        let empty = ReportStats::from_transactions(&[]);
        assert_eq!(empty.average_amount, Money::ZERO);
        assert_eq!(empty.unique_customers, 0);
    }

    #[test]
    fn test_scheme_summary() {
        let time = clock();
        let d1 = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings())
            .daily_amount(Money::from_major(100))
            .build(&time)
            .unwrap();
        let d2 = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings())
            .daily_amount(Money::from_major(300))
            .build(&time)
            .unwrap();
        let d3 = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let now = time.now();
        let transactions = vec![
            tx(d1.user_id, &d1, 100, now, PaymentMode::Cash),
            tx(d3.user_id, &d3, 50, now, PaymentMode::Cash),
        ];

        let rows = scheme_summary(&Scheme::catalogue(), &[d1, d2, d3], &transactions);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "Daily Savings");
        assert_eq!(rows[0].enrollments, 3);
        assert_eq!(rows[0].total_collected, Money::from_major(150));
        assert_eq!(rows[0].average_daily_amount, Money::from_major(200));
        assert_eq!(rows[0].interest_rate.as_percentage(), dec!(8.5));
        assert_eq!(rows[1].enrollments, 0);
        assert_eq!(rows[1].average_daily_amount, Money::ZERO);
    }

    #[test]
    fn test_dashboard_stats() {
        let time = clock();
        let now = time.now();
        let mut dormant = User::new("Dormant", "9000000009", now);
        dormant.is_active = false;
        let users = vec![User::new("Asha", "9000000001", now), dormant];

        let active = UserSchemeBuilder::new(users[0].id, Scheme::weekly_saver())
            .total_amount(Money::from_major(1_000))
            .build(&time)
            .unwrap();
        let done = UserSchemeBuilder::new(users[0].id, Scheme::weekly_saver())
            .total_amount(Money::from_major(500))
            .status(SchemeStatus::Completed)
            .build(&time)
            .unwrap();
        let user = users[0].id;
        let transactions = vec![
            tx(user, &active, 300, now, PaymentMode::Cash),
            tx(user, &active, 100, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(), PaymentMode::Cash),
            tx(user, &done, 500, Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap(), PaymentMode::Card),
        ];

        let stats = DashboardStats::compute(&users, &[active, done], &transactions, &time);
        assert_eq!(stats.total_customers, 1);
        assert_eq!(stats.active_schemes, 1);
        assert_eq!(stats.completed_cycles, 1);
        assert_eq!(stats.total_investment, Money::from_major(900));
        assert_eq!(stats.today_collection, Money::from_major(300));
        assert_eq!(stats.pending_dues, Money::from_major(600));
        // 400 this month against 500 last month
        assert_eq!(stats.monthly_growth, Some(dec!(-20)));
    }

    #[test]
    fn test_growth_without_history() {
        let time = clock();
        let stats = DashboardStats::compute(&[], &[], &[], &time);
        assert_eq!(stats.monthly_growth, None);
        assert_eq!(stats.total_investment, Money::ZERO);
    }

    #[test]
    fn test_daily_summary_totals() {
        let time = clock();
        let scheme = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let (user, other) = (scheme.user_id, Uuid::new_v4());
        let now = time.now();
        let transactions = vec![
            tx(user, &scheme, 500, now, PaymentMode::Cash),
            tx(user, &scheme, 300, now, PaymentMode::BankTransfer),
            tx(user, &scheme, 120, now, PaymentMode::Cash).with_entry_type(EntryType::Debit),
            tx(other, &scheme, 999, now, PaymentMode::Cash),
        ];

        let summary = daily_summary(&transactions, user, None, None);
        assert_eq!(summary.total_credit, Money::from_major(800));
        assert_eq!(summary.total_debit, Money::from_major(120));
        assert_eq!(summary.balance, Money::from_major(680));
        assert_eq!(summary.count, 3);
        assert!(summary.entries.iter().all(|t| t.user_id == user));
    }

    #[test]
    fn test_daily_summary_bounds_are_whole_days() {
        let time = clock();
        let scheme = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let user = scheme.user_id;
        let transactions = vec![
            tx(user, &scheme, 1, Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap(), PaymentMode::Cash),
            tx(user, &scheme, 10, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(), PaymentMode::Cash),
            tx(user, &scheme, 100, Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap(), PaymentMode::Cash),
            tx(user, &scheme, 1_000, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap(), PaymentMode::Cash),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 3, 10);
        let end = NaiveDate::from_ymd_opt(2024, 3, 15);

        let summary = daily_summary(&transactions, user, start, end);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_credit, Money::from_major(110));

        assert_eq!(daily_summary(&transactions, user, start, None).total_credit, Money::from_major(1_110));
        assert_eq!(daily_summary(&transactions, user, None, end).total_credit, Money::from_major(111));
    }

    #[test]
    fn test_daily_summary_without_matches() {
        let time = clock();
        let scheme = UserSchemeBuilder::new(Uuid::new_v4(), Scheme::daily_savings()).build(&time).unwrap();
        let transactions = vec![tx(scheme.user_id, &scheme, 50, time.now(), PaymentMode::Cash)];

        let summary = daily_summary(&transactions, Uuid::new_v4(), None, None);
        assert_eq!(summary.total_credit, Money::ZERO);
        assert_eq!(summary.total_debit, Money::ZERO);
        assert_eq!(summary.balance, Money::ZERO);
        assert_eq!(summary.count, 0);
        assert!(summary.entries.is_empty());
    }

    #[test]
    fn test_previous_month_wraps() {
        assert_eq!(previous_month((2024, 1)), (2023, 12));
        assert_eq!(previous_month((2024, 7)), (2024, 6));
    }
}
