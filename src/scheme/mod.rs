pub mod progress;

use chrono::{DateTime, Duration, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Scheme;
use crate::decimal::{Money, Rate};
use crate::errors::{FinanceError, Result};
use crate::interest::calculate_maturity_amount;
use crate::types::{SchemeStatus, UserId, UserSchemeId};

pub use progress::{calculate_remaining_amount, calculate_scheme_progress, SchemeProgress};

/// a customer's enrollment in a scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserScheme {
    pub id: UserSchemeId,
    pub user_id: UserId,
    pub scheme: Scheme,
    pub start_date: DateTime<Utc>,
    pub duration_days: u32,
    pub daily_amount: Option<Money>,
    pub total_amount: Money,
    pub interest_rate: Rate,
    pub current_balance: Money,
    pub status: SchemeStatus,
}

impl UserScheme {
    /// start date plus the enrollment's duration
    pub fn maturity_date(&self) -> DateTime<Utc> {
        self.start_date + Duration::days(i64::from(self.duration_days))
    }

    /// target amount plus simple interest over the full duration
    pub fn maturity_amount(&self) -> Money {
        calculate_maturity_amount(self.total_amount, self.interest_rate, Decimal::from(self.duration_days))
    }

    pub fn is_active(&self) -> bool {
        self.status == SchemeStatus::Active
    }
}

/// builds an enrollment, filling gaps from the scheme template
pub struct UserSchemeBuilder {
    user_id: UserId,
    scheme: Scheme,
    id: Option<UserSchemeId>,
    start_date: Option<DateTime<Utc>>,
    duration_days: Option<u32>,
    daily_amount: Option<Money>,
    total_amount: Option<Money>,
    interest_rate: Option<Rate>,
    current_balance: Money,
    status: SchemeStatus,
}

impl UserSchemeBuilder {
    pub fn new(user_id: UserId, scheme: Scheme) -> Self {
        Self {
            user_id,
            scheme,
            id: None,
            start_date: None,
            duration_days: None,
            daily_amount: None,
            total_amount: None,
            interest_rate: None,
            current_balance: Money::ZERO,
            status: SchemeStatus::Active,
        }
    }

    pub fn id(mut self, id: UserSchemeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn duration_days(mut self, days: u32) -> Self {
        self.duration_days = Some(days);
        self
    }

    pub fn daily_amount(mut self, amount: Money) -> Self {
        self.daily_amount = Some(amount);
        self
    }

    pub fn total_amount(mut self, amount: Money) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn interest_rate(mut self, rate: Rate) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn current_balance(mut self, balance: Money) -> Self {
        self.current_balance = balance;
        self
    }

    pub fn status(mut self, status: SchemeStatus) -> Self {
        self.status = status;
        self
    }

    /// Target amount: explicit if given, else `daily_amount * duration`,
    /// else the scheme minimum times the duration.
    fn derive_total(&self, duration_days: u32) -> Money {
        if let Some(total) = self.total_amount {
            return total;
        }
        let per_day = self.daily_amount.unwrap_or(self.scheme.min_amount);
        per_day * Decimal::from(duration_days)
    }

    pub fn build(self, time_provider: &SafeTimeProvider) -> Result<UserScheme> {
        let duration_days = self.duration_days.unwrap_or(self.scheme.duration_days);
        if duration_days == 0 {
            return Err(FinanceError::InvalidDuration { days: duration_days });
        }

        let interest_rate = self.interest_rate.unwrap_or(self.scheme.interest_rate);
        if !interest_rate.is_valid_percentage() {
            return Err(FinanceError::InvalidInterestRate { rate: interest_rate });
        }

        if let Some(daily) = self.daily_amount {
            if daily.is_negative() {
                return Err(FinanceError::InvalidAmount {
                    field: "daily_amount",
                    amount: daily,
                });
            }
        }

        let total_amount = self.derive_total(duration_days);
        if total_amount.is_negative() {
            return Err(FinanceError::InvalidAmount {
                field: "total_amount",
                amount: total_amount,
            });
        }
        if self.current_balance.is_negative() {
            return Err(FinanceError::InvalidAmount {
                field: "current_balance",
                amount: self.current_balance,
            });
        }

        let enrollment = UserScheme {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id: self.user_id,
            start_date: self.start_date.unwrap_or_else(|| time_provider.now()),
            duration_days,
            daily_amount: self.daily_amount,
            total_amount,
            interest_rate,
            current_balance: self.current_balance,
            status: self.status,
            scheme: self.scheme,
        };

        tracing::debug!(
            user_scheme_id = %enrollment.id,
            scheme = %enrollment.scheme.id,
            total_amount = %enrollment.total_amount,
            duration_days,
            "enrollment created"
        );

        Ok(enrollment)
    }
}
