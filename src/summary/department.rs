use std::{
    collections::BTreeMap,
    iter::Sum,
    ops::{Add, AddAssign},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Employee, UNASSIGNED_DEPARTMENT},
    ledger::LedgerRow,
};

use super::policy::utilization_percentage;

/// Summed ledger movements for an employee, a department, or the whole report.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerTotals {
    pub balance_bf: Decimal,
    pub days_accrued: Decimal,
    pub days_taken: Decimal,
    pub balance_cf: Decimal,
}

impl LedgerTotals {
    /// Collapses consecutive rows: opening of the first, closing of the last, summed movements.
    pub fn from_rows<'a, I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LedgerRow>,
    {
        let mut rows = rows.into_iter();
        let first = rows.next()?;
        let seed = Self {
            balance_bf: first.balance_bf,
            days_accrued: first.days_accrued,
            days_taken: first.days_taken,
            balance_cf: first.balance_cf,
        };
        Some(rows.fold(seed, |totals, row| Self {
            balance_bf: totals.balance_bf,
            days_accrued: totals.days_accrued + row.days_accrued,
            days_taken: totals.days_taken + row.days_taken,
            balance_cf: row.balance_cf,
        }))
    }
}

impl Add for LedgerTotals {
    type Output = LedgerTotals;

    fn add(self, other: LedgerTotals) -> LedgerTotals {
        LedgerTotals {
            balance_bf: self.balance_bf + other.balance_bf,
            days_accrued: self.days_accrued + other.days_accrued,
            days_taken: self.days_taken + other.days_taken,
            balance_cf: self.balance_cf + other.balance_cf,
        }
    }
}

impl AddAssign for LedgerTotals {
    fn add_assign(&mut self, other: LedgerTotals) {
        *self = *self + other;
    }
}

impl Sum for LedgerTotals {
    fn sum<I: Iterator<Item = LedgerTotals>>(iter: I) -> Self {
        iter.fold(LedgerTotals::default(), Add::add)
    }
}

impl<'a> Sum<&'a LedgerTotals> for LedgerTotals {
    fn sum<I: Iterator<Item = &'a LedgerTotals>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One employee's position for a reporting window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeBalance {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub leave_entitlement: Decimal,
    pub totals: LedgerTotals,
}

impl EmployeeBalance {
    pub fn new(employee: &Employee, totals: LedgerTotals) -> Self {
        Self {
            code: employee.code.clone(),
            name: employee.name.clone(),
            department: employee.department.clone(),
            leave_entitlement: employee.leave_entitlement,
            totals,
        }
    }

    pub fn department_key(&self) -> &str {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED_DEPARTMENT)
    }

    pub fn utilization_percentage(&self) -> Decimal {
        utilization_percentage(self.leave_entitlement, self.totals.balance_cf)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentSummary {
    pub department: String,
    pub members: Vec<EmployeeBalance>,
    pub subtotal: LedgerTotals,
}

/// Groups balances by department, ordered by department name, members ordered by code.
pub fn by_department<I>(balances: I) -> Vec<DepartmentSummary>
where
    I: IntoIterator<Item = EmployeeBalance>,
{
    let mut groups: BTreeMap<String, Vec<EmployeeBalance>> = BTreeMap::new();
    for balance in balances {
        groups
            .entry(balance.department_key().to_string())
            .or_default()
            .push(balance);
    }

    groups
        .into_iter()
        .map(|(department, mut members)| {
            members.sort_by(|a, b| a.code.cmp(&b.code));
            let subtotal = members.iter().map(|member| &member.totals).sum();
            DepartmentSummary {
                department,
                members,
                subtotal,
            }
        })
        .collect()
}

/// Sums department subtotals into the report's grand total.
pub fn grand_total(summaries: &[DepartmentSummary]) -> LedgerTotals {
    summaries.iter().map(|summary| &summary.subtotal).sum()
}
