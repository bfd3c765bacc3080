//! Builds per-month ledger rows for one employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Employee, LeaveApplication, LeaveBalancePeriod, YearMonth},
    errors::{LeaveError, Result},
};

use super::{
    accrual::{monthly_accrual, validate_rate},
    deduction::{apply_sorted, sort_applications, validate_days, DeductionStep},
};

/// One month of an employee's leave ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRow {
    pub period: YearMonth,
    pub balance_bf: Decimal,
    pub days_accrued: Decimal,
    pub days_taken: Decimal,
    pub balance_cf: Decimal,
    #[serde(default)]
    pub went_negative: bool,
}

impl LedgerRow {
    pub fn is_conserved(&self) -> bool {
        self.balance_bf + self.days_accrued - self.days_taken == self.balance_cf
    }
}

impl From<&LeaveBalancePeriod> for LedgerRow {
    fn from(row: &LeaveBalancePeriod) -> Self {
        Self {
            period: row.period,
            balance_bf: row.balance_bf,
            days_accrued: row.days_accrued,
            days_taken: row.days_taken,
            balance_cf: row.balance_cf,
            went_negative: row.balance_bf < Decimal::ZERO || row.balance_cf < Decimal::ZERO,
        }
    }
}

/// A validated ledger input set.
///
/// Construction checks the whole input; afterwards [`LedgerBuilder::rows`] cannot fail and
/// can be restarted any number of times with identical results.
#[derive(Debug, Clone)]
pub struct LedgerBuilder<'a> {
    employee: &'a Employee,
    opening_balance: Decimal,
    months: Vec<YearMonth>,
    applications: Vec<&'a LeaveApplication>,
}

impl<'a> LedgerBuilder<'a> {
    pub fn new<I>(
        employee: &'a Employee,
        opening_balance: Decimal,
        months: Vec<YearMonth>,
        applications: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LeaveApplication>,
    {
        validate_rate(employee)?;

        for pair in months.windows(2) {
            if pair[1] <= pair[0] {
                return Err(LeaveError::NonAscendingPeriods {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }

        let mut applications: Vec<&LeaveApplication> = applications.into_iter().collect();
        for application in &applications {
            if application.employee_code != employee.code {
                return Err(LeaveError::ForeignApplication {
                    application: application.id,
                    owner: application.employee_code.clone(),
                    employee: employee.code.clone(),
                });
            }
            if months.binary_search(&application.period()).is_err() {
                return Err(LeaveError::ApplicationOutOfRange {
                    application: application.id,
                    date_from: application.date_from,
                    range: describe_range(&months),
                });
            }
            validate_days(application)?;
        }
        sort_applications(&mut applications);

        tracing::debug!(
            employee = %employee.code,
            months = months.len(),
            applications = applications.len(),
            "ledger input validated"
        );

        Ok(Self {
            employee,
            opening_balance,
            months,
            applications,
        })
    }

    /// Covers every month from `from` through `to`.
    pub fn for_range<I>(
        employee: &'a Employee,
        opening_balance: Decimal,
        from: YearMonth,
        to: YearMonth,
        applications: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LeaveApplication>,
    {
        Self::new(
            employee,
            opening_balance,
            YearMonth::range_inclusive(from, to),
            applications,
        )
    }

    pub fn employee(&self) -> &Employee {
        self.employee
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    /// Lazily yields ledger rows in ascending month order.
    pub fn rows(&self) -> LedgerRows<'_> {
        LedgerRows {
            builder: self,
            index: 0,
            cursor: 0,
            balance: self.opening_balance,
        }
    }

    pub fn build(&self) -> Vec<LedgerRow> {
        self.rows().collect()
    }

    /// Closing balance after the last month, or the opening balance for an empty range.
    pub fn closing_balance(&self) -> Decimal {
        self.rows()
            .last()
            .map(|row| row.balance_cf)
            .unwrap_or(self.opening_balance)
    }
}

/// Iterator over the rows of a [`LedgerBuilder`], threading the running balance.
#[derive(Debug, Clone)]
pub struct LedgerRows<'b> {
    builder: &'b LedgerBuilder<'b>,
    index: usize,
    cursor: usize,
    balance: Decimal,
}

impl<'b> LedgerRows<'b> {
    /// Advances one month, returning the row and the individual deductions behind it.
    pub(crate) fn next_posting(&mut self) -> Option<(LedgerRow, Vec<DeductionStep>)> {
        let period = *self.builder.months.get(self.index)?;
        self.index += 1;

        let start = self.cursor;
        let applications = &self.builder.applications;
        while self.cursor < applications.len() && period.contains(applications[self.cursor].date_from)
        {
            self.cursor += 1;
        }
        let in_period = &applications[start..self.cursor];

        let balance_bf = self.balance;
        let days_accrued = monthly_accrual(self.builder.employee, period);
        let outcome = apply_sorted(balance_bf + days_accrued, in_period);
        self.balance = outcome.closing;

        if outcome.went_negative {
            tracing::warn!(
                employee = %self.builder.employee.code,
                period = %period,
                balance = %outcome.closing,
                "leave balance overdrawn"
            );
        }

        let row = LedgerRow {
            period,
            balance_bf,
            days_accrued,
            days_taken: outcome.days_taken,
            balance_cf: outcome.closing,
            went_negative: outcome.went_negative,
        };
        Some((row, outcome.steps))
    }
}

impl Iterator for LedgerRows<'_> {
    type Item = LedgerRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_posting().map(|(row, _)| row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.builder.months.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LedgerRows<'_> {}

fn describe_range(months: &[YearMonth]) -> String {
    match (months.first(), months.last()) {
        (Some(first), Some(last)) => format!("{first}..={last}"),
        _ => "(empty)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn application(id: u64, date: NaiveDate, days: Decimal) -> LeaveApplication {
        LeaveApplication {
            id,
            employee_code: "E1".into(),
            date_from: date,
            date_to: date,
            total_days: days,
            leave_type: "Annual".into(),
            comments: None,
        }
    }

    fn employee() -> Employee {
        Employee::new("E1", "Ada", dec!(15), dec!(1.25))
    }

    #[test]
    fn accrual_is_applied_before_deductions() {
        let employee = employee();
        let apps = vec![application(
            1,
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            dec!(3.0),
        )];
        let builder =
            LedgerBuilder::new(&employee, dec!(5.0), vec![ym(2024, 3)], &apps).unwrap();
        let rows = builder.build();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].balance_bf, dec!(5.0));
        assert_eq!(rows[0].days_accrued, dec!(1.25));
        assert_eq!(rows[0].days_taken, dec!(3.0));
        assert_eq!(rows[0].balance_cf, dec!(3.25));
        assert!(!rows[0].went_negative);
    }

    #[test]
    fn rows_are_restartable() {
        let employee = employee();
        let apps = vec![application(
            1,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            dec!(2),
        )];
        let builder =
            LedgerBuilder::for_range(&employee, dec!(0), ym(2024, 1), ym(2024, 4), &apps).unwrap();

        let mut first = builder.rows();
        first.next();
        let restarted: Vec<LedgerRow> = builder.rows().collect();
        assert_eq!(restarted.len(), 4);
        assert_eq!(restarted[0].period, ym(2024, 1));
        assert_eq!(builder.closing_balance(), dec!(3));
    }

    #[test]
    fn non_ascending_months_fail_fast() {
        let employee = employee();
        let err = LedgerBuilder::new(
            &employee,
            dec!(0),
            vec![ym(2024, 2), ym(2024, 2)],
            std::iter::empty::<&LeaveApplication>(),
        )
        .expect_err("duplicate month");
        assert!(matches!(err, LeaveError::NonAscendingPeriods { .. }));
    }

    #[test]
    fn application_outside_range_fails_fast() {
        let employee = employee();
        let apps = vec![application(
            5,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            dec!(1),
        )];
        let err = LedgerBuilder::for_range(&employee, dec!(0), ym(2024, 1), ym(2024, 3), &apps)
            .expect_err("out of range");
        assert!(matches!(
            err,
            LeaveError::ApplicationOutOfRange { application: 5, .. }
        ));
    }

    #[test]
    fn foreign_application_is_rejected() {
        let employee = employee();
        let mut app = application(3, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(), dec!(1));
        app.employee_code = "E2".into();
        let apps = vec![app];
        let err = LedgerBuilder::for_range(&employee, dec!(0), ym(2024, 1), ym(2024, 1), &apps)
            .expect_err("foreign");
        assert!(matches!(err, LeaveError::ForeignApplication { .. }));
    }

    #[test]
    fn persisted_row_converts_to_ledger_row() {
        let persisted = LeaveBalancePeriod {
            employee_code: "E1".into(),
            period: ym(2024, 1),
            balance_bf: dec!(1),
            days_accrued: dec!(1.25),
            days_taken: dec!(3),
            balance_cf: dec!(-0.75),
        };
        let row = LedgerRow::from(&persisted);
        assert!(row.is_conserved());
        assert!(row.went_negative);
    }
}
