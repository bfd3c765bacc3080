use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::YearMonth;

pub type Result<T> = std::result::Result<T, LeaveError>;

/// Error type that captures ledger input violations and persistence failures.
#[derive(Debug, Error)]
pub enum LeaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid accrual rate {rate} for employee `{employee}`: rate must not be negative")]
    InvalidRate { employee: String, rate: Decimal },
    #[error("Invalid day count {days} on leave application #{application}")]
    InvalidDays { application: u64, days: Decimal },
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Periods must be strictly ascending: {previous} is followed by {next}")]
    NonAscendingPeriods { previous: YearMonth, next: YearMonth },
    #[error("Leave application #{application} starts on {date_from}, outside the ledger range {range}")]
    ApplicationOutOfRange {
        application: u64,
        date_from: NaiveDate,
        range: String,
    },
    #[error("Leave application #{application} belongs to `{owner}`, not `{employee}`")]
    ForeignApplication {
        application: u64,
        owner: String,
        employee: String,
    },
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),
}
