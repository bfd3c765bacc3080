use serde::{Deserialize, Serialize};

use super::{Employee, LeaveApplication, LeaveBalancePeriod, YearMonth};

/// A frozen, consistent read of employees, balance rows, and approved applications.
///
/// The caller is responsible for taking the snapshot in a single consistent read.
/// Every report in this crate is derived from one snapshot and never writes back to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeaveSnapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub periods: Vec<LeaveBalancePeriod>,
    #[serde(default)]
    pub applications: Vec<LeaveApplication>,
}

impl LeaveSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee(&self, code: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.code == code)
    }

    /// Employees ordered by code.
    pub fn employees_by_code(&self) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = self.employees.iter().collect();
        employees.sort_by(|a, b| a.code.cmp(&b.code));
        employees
    }

    /// Persisted balance rows for one employee in month order.
    pub fn periods_for(&self, code: &str) -> Vec<&LeaveBalancePeriod> {
        let mut rows: Vec<&LeaveBalancePeriod> = self
            .periods
            .iter()
            .filter(|row| row.employee_code == code)
            .collect();
        rows.sort_by_key(|row| row.period);
        rows
    }

    pub fn period_row(&self, code: &str, period: YearMonth) -> Option<&LeaveBalancePeriod> {
        self.periods
            .iter()
            .find(|row| row.employee_code == code && row.period == period)
    }

    /// Applications of one employee charged to months in `from..=to`.
    pub fn applications_between(
        &self,
        code: &str,
        from: YearMonth,
        to: YearMonth,
    ) -> Vec<&LeaveApplication> {
        self.applications
            .iter()
            .filter(|application| application.employee_code == code)
            .filter(|application| {
                let period = application.period();
                period >= from && period <= to
            })
            .collect()
    }
}
