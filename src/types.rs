use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{FinanceError, Result};

/// unique identifier for a customer
pub type UserId = Uuid;

/// unique identifier for a customer's enrollment in a scheme
pub type UserSchemeId = Uuid;

/// unique identifier for a recorded payment
pub type TransactionId = Uuid;

/// catalogue key of a scheme template (e.g. "daily-savings")
pub type SchemeId = String;

/// how a payment was collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMode {
    Cash,
    Card,
    MobileWallet,
    BankTransfer,
}

impl PaymentMode {
    /// every mode, in report order
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Card,
        PaymentMode::MobileWallet,
        PaymentMode::BankTransfer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::MobileWallet => "mobile-wallet",
            PaymentMode::BankTransfer => "bank-transfer",
        }
    }

    /// anything other than cash counts as an online collection
    pub fn is_online(&self) -> bool {
        !matches!(self, PaymentMode::Cash)
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// contribution cadence of a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeFrequency {
    Daily,
    Weekly,
    Monthly,
    LumpSum,
}

/// enrollment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeStatus {
    /// accepting contributions
    Active,
    /// target reached or duration elapsed
    Completed,
    /// temporarily suspended by the customer
    Paused,
}

/// direction of a ledger entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    /// money received from the customer
    #[default]
    Credit,
    /// money paid out to the customer
    Debit,
}

/// a single payment recorded against an enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub scheme_id: UserSchemeId,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub payment_mode: PaymentMode,
    /// collections are credits; records without the field load as credits
    #[serde(default)]
    pub entry_type: EntryType,
    /// interest computed when the entry was recorded
    pub interest: Money,
    pub remarks: Option<String>,
    pub receipt_number: Option<String>,
}

impl Transaction {
    pub fn new(
        user_id: UserId,
        scheme_id: UserSchemeId,
        amount: Money,
        date: DateTime<Utc>,
        payment_mode: PaymentMode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            scheme_id,
            amount,
            date,
            payment_mode,
            entry_type: EntryType::Credit,
            interest: Money::ZERO,
            remarks: None,
            receipt_number: None,
        }
    }

    pub fn with_interest(mut self, interest: Money) -> Self {
        self.interest = interest;
        self
    }

    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn with_receipt(mut self, receipt_number: impl Into<String>) -> Self {
        self.receipt_number = Some(receipt_number.into());
        self
    }
}

/// customer record, reduced to what the reports read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub mobile_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, mobile_number: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mobile_number: mobile_number.into(),
            is_active: true,
            created_at,
        }
    }
}

/// parse an ISO `YYYY-MM-DD` date coming from outside the library
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| FinanceError::InvalidDate {
        message: format!("{s:?}: {e}"),
    })
}
