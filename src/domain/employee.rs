use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// Group key used for employees without a department.
pub const UNASSIGNED_DEPARTMENT: &str = "UNASSIGNED";

/// Employee master data as supplied by the HR record. Read-only to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Annual entitlement in days.
    pub leave_entitlement: Decimal,
    /// Days credited per month.
    pub leave_accrual_rate: Decimal,
    /// First month in which the employee accrues leave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual_start: Option<YearMonth>,
}

impl Employee {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        leave_entitlement: Decimal,
        leave_accrual_rate: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            department: None,
            leave_entitlement,
            leave_accrual_rate,
            accrual_start: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_accrual_start(mut self, month: YearMonth) -> Self {
        self.accrual_start = Some(month);
        self
    }

    /// Department name, falling back to [`UNASSIGNED_DEPARTMENT`] when missing or blank.
    pub fn department_key(&self) -> &str {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED_DEPARTMENT)
    }
}
