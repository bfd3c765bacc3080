#![allow(dead_code)]

use chrono::NaiveDate;
use leave_ledger::domain::{
    Employee, LeaveApplication, LeaveBalancePeriod, LeaveSnapshot, YearMonth,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid month")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn application(
    id: u64,
    code: &str,
    date_from: NaiveDate,
    days: Decimal,
) -> LeaveApplication {
    LeaveApplication {
        id,
        employee_code: code.into(),
        date_from,
        date_to: date_from,
        total_days: days,
        leave_type: "Annual".into(),
        comments: None,
    }
}

pub fn period(
    code: &str,
    period: YearMonth,
    bf: Decimal,
    accrued: Decimal,
    taken: Decimal,
) -> LeaveBalancePeriod {
    LeaveBalancePeriod {
        employee_code: code.into(),
        period,
        balance_bf: bf,
        days_accrued: accrued,
        days_taken: taken,
        balance_cf: bf + accrued - taken,
    }
}

/// Three employees across two departments with consistent Q1 2024 balance rows.
///
/// Closing balances for March: E1 = 3.25, E2 = 10.00 (department A), E3 = 2.00 (department B).
pub fn sample_snapshot() -> LeaveSnapshot {
    let mut snapshot = LeaveSnapshot::new();
    snapshot.employees = vec![
        Employee::new("E1", "Ada Lovelace", dec!(15), dec!(1.25)).with_department("A"),
        Employee::new("E2", "Grace Hopper", dec!(20), dec!(0)).with_department("A"),
        Employee::new("E3", "Alan Turing", dec!(20), dec!(1)).with_department("B"),
    ];

    snapshot.applications = vec![
        application(1, "E1", date(2024, 3, 14), dec!(3.0)),
        application(2, "E3", date(2024, 2, 5), dec!(2.0)),
    ];

    snapshot.periods = vec![
        period("E1", ym(2024, 1), dec!(2.5), dec!(1.25), dec!(0)),
        period("E1", ym(2024, 2), dec!(3.75), dec!(1.25), dec!(0)),
        period("E1", ym(2024, 3), dec!(5.0), dec!(1.25), dec!(3.0)),
        period("E2", ym(2024, 1), dec!(10), dec!(0), dec!(0)),
        period("E2", ym(2024, 2), dec!(10), dec!(0), dec!(0)),
        period("E2", ym(2024, 3), dec!(10), dec!(0), dec!(0)),
        period("E3", ym(2024, 1), dec!(1), dec!(1), dec!(0)),
        period("E3", ym(2024, 2), dec!(2), dec!(1), dec!(2)),
        period("E3", ym(2024, 3), dec!(1), dec!(1), dec!(0)),
    ];
    snapshot
}
