use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{LeaveSnapshot, YearMonth},
    errors::{LeaveError, Result},
    ledger::{reconcile, Discrepancy, LedgerRow},
    summary::{
        by_department, by_year, grand_total, warnings, Band, BandCounts, DepartmentSummary,
        EmployeeBalance, LedgerTotals, ThresholdPolicy, UtilizationPolicy, WarningReport,
        YearSummary,
    },
};

use super::LedgerService;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UtilizationLine {
    pub code: String,
    pub utilization: Decimal,
    pub band: Band,
}

/// Year-to-date balances grouped by department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceReport {
    pub as_of: YearMonth,
    pub departments: Vec<DepartmentSummary>,
    pub grand_total: LedgerTotals,
    pub utilization: Vec<UtilizationLine>,
    pub counts: BandCounts,
}

/// Assembles report data from persisted balance rows.
pub struct ReportService;

impl ReportService {
    /// Year-to-date position of every employee with persisted rows between January and `as_of`.
    pub fn employee_balances(snapshot: &LeaveSnapshot, as_of: YearMonth) -> Vec<EmployeeBalance> {
        snapshot
            .employees_by_code()
            .into_iter()
            .filter_map(|employee| {
                let rows = LedgerService::persisted_rows(
                    snapshot,
                    &employee.code,
                    as_of.year_start(),
                    as_of,
                );
                match LedgerTotals::from_rows(&rows) {
                    Some(totals) => Some(EmployeeBalance::new(employee, totals)),
                    None => {
                        tracing::debug!(employee = %employee.code, %as_of, "no balance rows in year");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn balances(
        snapshot: &LeaveSnapshot,
        as_of: YearMonth,
        policy: &UtilizationPolicy,
    ) -> BalanceReport {
        let balances = Self::employee_balances(snapshot, as_of);
        let utilization: Vec<UtilizationLine> = balances
            .iter()
            .map(|balance| {
                let utilization = balance.utilization_percentage();
                UtilizationLine {
                    code: balance.code.clone(),
                    utilization,
                    band: policy.classify(utilization),
                }
            })
            .collect();
        let counts = utilization.iter().map(|line| line.band).collect();
        let departments = by_department(balances);
        let grand_total = grand_total(&departments);

        tracing::info!(
            %as_of,
            departments = departments.len(),
            employees = utilization.len(),
            "balance report assembled"
        );

        BalanceReport {
            as_of,
            departments,
            grand_total,
            utilization,
            counts,
        }
    }

    pub fn warnings(
        snapshot: &LeaveSnapshot,
        as_of: YearMonth,
        policy: &ThresholdPolicy,
    ) -> WarningReport {
        let balances = Self::employee_balances(snapshot, as_of);
        let report = warnings(&balances, policy);
        if report.counts.critical > 0 {
            tracing::warn!(
                %as_of,
                critical = report.counts.critical,
                "employees at critical leave balance"
            );
        }
        report
    }

    /// Per-year roll-up of an employee's persisted rows.
    pub fn yearly(snapshot: &LeaveSnapshot, code: &str) -> Result<Vec<YearSummary>> {
        if snapshot.employee(code).is_none() {
            return Err(LeaveError::UnknownEmployee(code.to_string()));
        }
        let rows: Vec<_> = snapshot
            .periods_for(code)
            .into_iter()
            .map(LedgerRow::from)
            .collect();
        Ok(by_year(&rows))
    }

    pub fn reconcile(snapshot: &LeaveSnapshot) -> Vec<Discrepancy> {
        reconcile(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, LeaveBalancePeriod};
    use rust_decimal_macros::dec;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn period(code: &str, month: u32, bf: Decimal, cf: Decimal) -> LeaveBalancePeriod {
        LeaveBalancePeriod {
            employee_code: code.into(),
            period: ym(2024, month),
            balance_bf: bf,
            days_accrued: cf - bf,
            days_taken: Decimal::ZERO,
            balance_cf: cf,
        }
    }

    #[test]
    fn balances_use_year_to_date_rows() {
        let mut snapshot = LeaveSnapshot::new();
        snapshot
            .employees
            .push(Employee::new("E1", "Ada", dec!(20), dec!(1)).with_department("Ops"));
        snapshot
            .employees
            .push(Employee::new("E2", "Bo", dec!(0), dec!(0)));
        snapshot.periods.push(period("E1", 1, dec!(0), dec!(1)));
        snapshot.periods.push(period("E1", 2, dec!(1), dec!(2)));
        snapshot.periods.push(period("E1", 3, dec!(2), dec!(3)));
        snapshot.periods.push(period("E2", 1, dec!(0), dec!(0)));

        let report = ReportService::balances(&snapshot, ym(2024, 2), &UtilizationPolicy::default());

        assert_eq!(report.departments.len(), 2);
        assert_eq!(report.departments[0].department, "Ops");
        let ops = &report.departments[0].subtotal;
        assert_eq!(ops.balance_bf, dec!(0));
        assert_eq!(ops.days_accrued, dec!(2));
        assert_eq!(ops.balance_cf, dec!(2));
        assert_eq!(report.utilization[0].band, Band::Critical);
        assert_eq!(report.utilization[1].utilization, Decimal::ZERO);
        assert_eq!(report.counts.total(), 2);
    }
}
