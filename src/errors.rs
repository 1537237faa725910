use thiserror::Error;
use uuid::Uuid;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("scheme {scheme_id} has a zero target amount, completion is undefined")]
    ZeroTargetAmount {
        scheme_id: Uuid,
    },

    #[error("invalid interest rate: {rate} (must lie within 0% to 100%)")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid amount for {field}: {amount}")]
    InvalidAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("invalid duration: {days} days")]
    InvalidDuration {
        days: u32,
    },

    #[error("invalid contribution range: minimum {min} exceeds maximum {max}")]
    InvalidAmountRange {
        min: Money,
        max: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("unknown scheme: {id}")]
    UnknownScheme {
        id: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, FinanceError>;
