//! Flattened leave statement: opening balance, accruals, leave taken, closing balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::YearMonth;

use super::builder::LedgerBuilder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementEntry {
    Opening {
        period: YearMonth,
        balance: Decimal,
    },
    Accrued {
        period: YearMonth,
        days: Decimal,
        balance: Decimal,
    },
    Taken {
        period: YearMonth,
        application_id: u64,
        leave_type: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        days: Decimal,
        balance: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comments: Option<String>,
    },
    Closing {
        period: YearMonth,
        balance: Decimal,
    },
}

impl StatementEntry {
    /// Running balance after the entry.
    pub fn balance(&self) -> Decimal {
        match self {
            StatementEntry::Opening { balance, .. }
            | StatementEntry::Accrued { balance, .. }
            | StatementEntry::Taken { balance, .. }
            | StatementEntry::Closing { balance, .. } => *balance,
        }
    }

    pub fn period(&self) -> YearMonth {
        match self {
            StatementEntry::Opening { period, .. }
            | StatementEntry::Accrued { period, .. }
            | StatementEntry::Taken { period, .. }
            | StatementEntry::Closing { period, .. } => *period,
        }
    }
}

impl LedgerBuilder<'_> {
    /// Expands the ledger into statement lines.
    ///
    /// Months without accrual emit no accrued line. Empty ranges yield no entries.
    pub fn statement(&self) -> Vec<StatementEntry> {
        let (Some(first), Some(last)) = (self.months().first(), self.months().last()) else {
            return Vec::new();
        };

        let mut entries = vec![StatementEntry::Opening {
            period: *first,
            balance: self.opening_balance(),
        }];
        let mut rows = self.rows();
        let mut closing = self.opening_balance();

        while let Some((row, steps)) = rows.next_posting() {
            if row.days_accrued != Decimal::ZERO {
                entries.push(StatementEntry::Accrued {
                    period: row.period,
                    days: row.days_accrued,
                    balance: row.balance_bf + row.days_accrued,
                });
            }
            entries.extend(steps.into_iter().map(|step| StatementEntry::Taken {
                period: row.period,
                application_id: step.application_id,
                leave_type: step.leave_type,
                date_from: step.date_from,
                date_to: step.date_to,
                days: step.days,
                balance: step.balance,
                comments: step.comments,
            }));
            closing = row.balance_cf;
        }

        entries.push(StatementEntry::Closing {
            period: *last,
            balance: closing,
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, LeaveApplication};
    use rust_decimal_macros::dec;

    #[test]
    fn statement_lists_accrual_before_leave_taken() {
        let employee = Employee::new("E1", "Ada", dec!(15), dec!(1.25));
        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();
        let apps = vec![LeaveApplication {
            id: 11,
            employee_code: "E1".into(),
            date_from: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
            total_days: dec!(2),
            leave_type: "Annual".into(),
            comments: Some("family".into()),
        }];
        let builder = LedgerBuilder::for_range(&employee, dec!(4), jan, feb, &apps).unwrap();
        let entries = builder.statement();

        assert_eq!(entries.len(), 5);
        assert!(matches!(entries[0], StatementEntry::Opening { .. }));
        assert!(matches!(entries[1], StatementEntry::Accrued { period, .. } if period == jan));
        assert!(matches!(entries[2], StatementEntry::Accrued { period, .. } if period == feb));
        assert!(
            matches!(&entries[3], StatementEntry::Taken { application_id: 11, balance, .. } if *balance == dec!(4.5))
        );
        assert_eq!(entries[4].balance(), dec!(4.5));
        assert_eq!(entries[4].balance(), builder.closing_balance());
    }
}
