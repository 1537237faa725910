pub mod bonus;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod receipt;
pub mod reports;
pub mod scheme;
pub mod serialization;
pub mod types;

// re-export key types
pub use bonus::{
    calculate_bonus, get_next_payment_date, get_week_number, is_eligible_for_bonus, BonusEngine, BonusPayment,
    BonusStatus, IsoWeek,
};
pub use config::{BonusPolicy, LedgerConfig, ReportConfig, Scheme};
pub use decimal::{Money, Rate};
pub use errors::{FinanceError, Result};
pub use interest::{
    calculate_daily_interest, calculate_interest, calculate_maturity_amount, entry_interest, InterestCalculation,
    InterestCalculator, SimpleInterestEngine,
};
pub use receipt::generate_receipt_number;
pub use reports::{daily_summary, DailySummary, DailyTrend, Distribution, SeriesPoint};
pub use scheme::{calculate_scheme_progress, SchemeProgress, UserScheme, UserSchemeBuilder};
pub use types::{EntryType, PaymentMode, SchemeFrequency, SchemeStatus, Transaction, User};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
