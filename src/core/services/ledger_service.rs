use rust_decimal::Decimal;

use crate::{
    domain::{LeaveSnapshot, YearMonth},
    errors::{LeaveError, Result},
    ledger::{LedgerBuilder, LedgerRow, StatementEntry},
};

/// Builds per-employee ledgers from a [`LeaveSnapshot`].
pub struct LedgerService;

impl LedgerService {
    /// Prepares a builder for `code` covering `from..=to`.
    ///
    /// The opening balance is the persisted `balance_bf` of `from`, else the persisted
    /// `balance_cf` of the month before, else zero.
    pub fn builder<'a>(
        snapshot: &'a LeaveSnapshot,
        code: &str,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<LedgerBuilder<'a>> {
        let employee = snapshot
            .employee(code)
            .ok_or_else(|| LeaveError::UnknownEmployee(code.to_string()))?;
        let opening = Self::opening_balance(snapshot, code, from);
        let applications = snapshot.applications_between(code, from, to);
        LedgerBuilder::for_range(employee, opening, from, to, applications)
    }

    pub fn opening_balance(snapshot: &LeaveSnapshot, code: &str, month: YearMonth) -> Decimal {
        if let Some(row) = snapshot.period_row(code, month) {
            return row.balance_bf;
        }
        snapshot
            .period_row(code, month.pred())
            .map(|row| row.balance_cf)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn rows(
        snapshot: &LeaveSnapshot,
        code: &str,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<LedgerRow>> {
        Ok(Self::builder(snapshot, code, from, to)?.build())
    }

    pub fn statement(
        snapshot: &LeaveSnapshot,
        code: &str,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<StatementEntry>> {
        Ok(Self::builder(snapshot, code, from, to)?.statement())
    }

    /// Persisted rows for `code` within `from..=to`, as ledger rows.
    pub fn persisted_rows(
        snapshot: &LeaveSnapshot,
        code: &str,
        from: YearMonth,
        to: YearMonth,
    ) -> Vec<LedgerRow> {
        snapshot
            .periods_for(code)
            .into_iter()
            .filter(|row| row.period >= from && row.period <= to)
            .map(LedgerRow::from)
            .collect()
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

    fn snapshot() -> LeaveSnapshot {
        let mut snapshot = LeaveSnapshot::new();
        snapshot
            .employees
            .push(Employee::new("E1", "Ada", dec!(15), dec!(1.25)));
        snapshot.periods.push(LeaveBalancePeriod {
            employee_code: "E1".into(),
            period: ym(2024, 1),
            balance_bf: dec!(5),
            days_accrued: dec!(1.25),
            days_taken: dec!(0),
            balance_cf: dec!(6.25),
        });
        snapshot
    }

    #[test]
    fn opening_balance_prefers_persisted_bf() {
        let snapshot = snapshot();
        assert_eq!(LedgerService::opening_balance(&snapshot, "E1", ym(2024, 1)), dec!(5));
        assert_eq!(
            LedgerService::opening_balance(&snapshot, "E1", ym(2024, 2)),
            dec!(6.25)
        );
        assert_eq!(
            LedgerService::opening_balance(&snapshot, "E1", ym(2024, 6)),
            Decimal::ZERO
        );
    }

    #[test]
    fn unknown_employee_is_an_error() {
        let snapshot = snapshot();
        let err = LedgerService::rows(&snapshot, "E9", ym(2024, 1), ym(2024, 2))
            .expect_err("unknown employee");
        assert!(matches!(err, LeaveError::UnknownEmployee(code) if code == "E9"));
    }

    #[test]
    fn rebuilt_rows_match_persisted_rows() {
        let snapshot = snapshot();
        let rebuilt = LedgerService::rows(&snapshot, "E1", ym(2024, 1), ym(2024, 1)).unwrap();
        let persisted = LedgerService::persisted_rows(&snapshot, "E1", ym(2024, 1), ym(2024, 1));
        assert_eq!(rebuilt, persisted);
    }
}
