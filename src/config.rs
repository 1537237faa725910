use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{FinanceError, Result};
use crate::types::{SchemeFrequency, SchemeId};

/// scheme template offered to customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    pub description: String,
    pub interest_rate: Rate,
    pub min_amount: Money,
    pub max_amount: Money,
    pub duration_days: u32,
    pub frequency: SchemeFrequency,
}

impl Scheme {
    /// small daily deposits over a year
    pub fn daily_savings() -> Self {
        Self {
            id: "daily-savings".to_string(),
            name: "Daily Savings".to_string(),
            description: "Save a small amount daily".to_string(),
            interest_rate: Rate::from_percentage(dec!(8.5)),
            min_amount: Money::from_major(50),
            max_amount: Money::from_major(1_000),
            duration_days: 365,
            frequency: SchemeFrequency::Daily,
        }
    }

    /// monthly investment plan
    pub fn monthly_investment() -> Self {
        Self {
            id: "monthly-investment".to_string(),
            name: "Monthly Investment".to_string(),
            description: "Monthly investment plan".to_string(),
            interest_rate: Rate::from_percentage(dec!(10.2)),
            min_amount: Money::from_major(1_000),
            max_amount: Money::from_major(50_000),
            duration_days: 365,
            frequency: SchemeFrequency::Monthly,
        }
    }

    /// single up-front deposit held for a year
    pub fn yearly_growth() -> Self {
        Self {
            id: "yearly-growth".to_string(),
            name: "Yearly Growth".to_string(),
            description: "Annual savings scheme".to_string(),
            interest_rate: Rate::from_percentage(dec!(12.5)),
            min_amount: Money::from_major(10_000),
            max_amount: Money::from_major(100_000),
            duration_days: 365,
            frequency: SchemeFrequency::LumpSum,
        }
    }

    /// weekly contributions with flexible amounts
    pub fn weekly_saver() -> Self {
        Self {
            id: "weekly-saver".to_string(),
            name: "Weekly Saver".to_string(),
            description: "Contribute weekly with flexible amounts".to_string(),
            interest_rate: Rate::from_percentage(dec!(9.0)),
            min_amount: Money::from_major(200),
            max_amount: Money::from_major(5_000),
            duration_days: 365,
            frequency: SchemeFrequency::Weekly,
        }
    }

    /// the standard catalogue
    pub fn catalogue() -> Vec<Scheme> {
        vec![
            Self::daily_savings(),
            Self::monthly_investment(),
            Self::yearly_growth(),
            Self::weekly_saver(),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if !self.interest_rate.is_valid_percentage() {
            return Err(FinanceError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }
        if self.min_amount.is_negative() {
            return Err(FinanceError::InvalidAmount {
                field: "min_amount",
                amount: self.min_amount,
            });
        }
        if self.min_amount > self.max_amount {
            return Err(FinanceError::InvalidAmountRange {
                min: self.min_amount,
                max: self.max_amount,
            });
        }
        if self.duration_days == 0 {
            return Err(FinanceError::InvalidDuration {
                days: self.duration_days,
            });
        }
        Ok(())
    }

    /// whether a single contribution falls within the scheme's limits
    pub fn accepts_contribution(&self, amount: Money) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }
}

/// weekly bonus rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusPolicy {
    /// flat amount credited per eligible payment
    pub amount: Money,
    /// days between expected payments
    pub cadence_days: u32,
    /// payments on the first N weekdays (Monday first) earn the bonus
    pub eligible_weekdays: u32,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            amount: Money::from_major(5),
            cadence_days: 7,
            eligible_weekdays: 5,
        }
    }
}

/// defaults for chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// trailing days covered by the daily collection series
    pub day_window: u32,
    /// smoothing window applied to daily series
    pub moving_average_window: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            day_window: 30,
            moving_average_window: 7,
        }
    }
}

/// top-level configuration handed in by the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub schemes: Vec<Scheme>,
    #[serde(default)]
    pub bonus: BonusPolicy,
    #[serde(default)]
    pub reports: ReportConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            schemes: Scheme::catalogue(),
            bonus: BonusPolicy::default(),
            reports: ReportConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// parse and validate a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json).map_err(|e| {
            FinanceError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for scheme in &self.schemes {
            scheme.validate()?;
        }
        for (i, scheme) in self.schemes.iter().enumerate() {
            if self.schemes[..i].iter().any(|s| s.id == scheme.id) {
                return Err(FinanceError::InvalidConfiguration {
                    message: format!("duplicate scheme id {:?}", scheme.id),
                });
            }
        }
        if self.bonus.amount.is_negative() {
            return Err(FinanceError::InvalidAmount {
                field: "bonus.amount",
                amount: self.bonus.amount,
            });
        }
        if self.bonus.cadence_days == 0 {
            return Err(FinanceError::InvalidConfiguration {
                message: "bonus cadence must be at least one day".to_string(),
            });
        }
        if self.bonus.eligible_weekdays > 7 {
            return Err(FinanceError::InvalidConfiguration {
                message: format!("{} eligible weekdays in a 7-day week", self.bonus.eligible_weekdays),
            });
        }
        Ok(())
    }

    pub fn scheme(&self, id: &str) -> Result<&Scheme> {
        self.schemes
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| FinanceError::UnknownScheme { id: id.to_string() })
    }
}
