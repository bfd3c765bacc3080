use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// A persisted monthly balance row for one employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalancePeriod {
    pub employee_code: String,
    pub period: YearMonth,
    pub balance_bf: Decimal,
    pub days_accrued: Decimal,
    pub days_taken: Decimal,
    pub balance_cf: Decimal,
}

impl LeaveBalancePeriod {
    /// Closing balance implied by the row's own movements.
    pub fn expected_cf(&self) -> Decimal {
        self.balance_bf + self.days_accrued - self.days_taken
    }

    pub fn is_conserved(&self) -> bool {
        self.expected_cf() == self.balance_cf
    }
}
