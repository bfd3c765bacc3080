use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// An approved leave application. Immutable once approved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveApplication {
    pub id: u64,
    pub employee_code: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub total_days: Decimal,
    pub leave_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl LeaveApplication {
    /// The balance period the application is charged to.
    pub fn period(&self) -> YearMonth {
        YearMonth::from_date(self.date_from)
    }
}
