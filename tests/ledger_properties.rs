mod common;

use common::{application, date, sample_snapshot, ym};
use leave_ledger::{
    core::services::LedgerService,
    domain::{Employee, LeaveApplication, YearMonth},
    ledger::{LedgerBuilder, LedgerRow},
    LeaveError,
};
use rust_decimal_macros::dec;

fn assert_continuous(rows: &[LedgerRow]) {
    for pair in rows.windows(2) {
        assert_eq!(
            pair[1].balance_bf, pair[0].balance_cf,
            "continuity broken between {} and {}",
            pair[0].period, pair[1].period
        );
        assert!(pair[0].period < pair[1].period);
    }
}

#[test]
fn scenario_mid_month_application() {
    let employee = Employee::new("E1", "Ada", dec!(15), dec!(1.25));
    let apps = vec![application(1, "E1", date(2024, 3, 14), dec!(3.0))];
    let builder = LedgerBuilder::new(&employee, dec!(5.0), vec![ym(2024, 3)], &apps)
        .expect("valid input");
    let rows = builder.build();

    assert_eq!(rows[0].balance_bf, dec!(5.0));
    assert_eq!(rows[0].days_accrued, dec!(1.25));
    assert_eq!(rows[0].days_taken, dec!(3.0));
    assert_eq!(rows[0].balance_cf, dec!(3.25));
}

#[test]
fn long_range_keeps_continuity_and_conservation_exactly() {
    let employee = Employee::new("E1", "Ada", dec!(18), dec!(1.5));
    let apps: Vec<_> = (1..=24u32)
        .map(|idx| {
            let year = 2023 + ((idx - 1) / 12) as i32;
            let month = (idx - 1) % 12 + 1;
            application(idx as u64, "E1", date(year, month, 10), dec!(0.33))
        })
        .collect();
    let builder =
        LedgerBuilder::for_range(&employee, dec!(0.1), ym(2023, 1), ym(2024, 12), &apps)
            .expect("valid input");
    let rows = builder.build();

    assert_eq!(rows.len(), 24);
    assert_continuous(&rows);
    assert!(rows.iter().all(LedgerRow::is_conserved));
    // 0.1 + 24 * (1.5 - 0.33)
    assert_eq!(builder.closing_balance(), dec!(28.18));
}

#[test]
fn rebuilding_is_idempotent() {
    let snapshot = sample_snapshot();
    let first = LedgerService::rows(&snapshot, "E1", ym(2024, 1), ym(2024, 3)).unwrap();
    let second = LedgerService::rows(&snapshot, "E1", ym(2024, 1), ym(2024, 3)).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn rebuilt_ledger_matches_persisted_rows() {
    let snapshot = sample_snapshot();
    for code in ["E1", "E2", "E3"] {
        let rebuilt = LedgerService::rows(&snapshot, code, ym(2024, 1), ym(2024, 3)).unwrap();
        let persisted = LedgerService::persisted_rows(&snapshot, code, ym(2024, 1), ym(2024, 3));
        assert_eq!(rebuilt, persisted, "ledger mismatch for {code}");
    }
}

#[test]
fn overdrawn_month_is_reported_as_data() {
    let employee = Employee::new("E1", "Ada", dec!(15), dec!(1));
    let apps = vec![
        application(1, "E1", date(2024, 2, 1), dec!(4)),
        application(2, "E1", date(2024, 3, 1), dec!(0.5)),
    ];
    let rows = LedgerBuilder::for_range(&employee, dec!(0), ym(2024, 1), ym(2024, 3), &apps)
        .unwrap()
        .build();

    assert!(!rows[0].went_negative);
    assert!(rows[1].went_negative);
    assert_eq!(rows[1].balance_cf, dec!(-2));
    assert_eq!(rows[2].balance_cf, dec!(-1.5));
    assert_continuous(&rows);
}

#[test]
fn negative_rate_fails_before_any_row() {
    let employee = Employee::new("E1", "Ada", dec!(15), dec!(-1));
    let err = LedgerBuilder::for_range(
        &employee,
        dec!(0),
        ym(2024, 1),
        ym(2024, 2),
        std::iter::empty::<&LeaveApplication>(),
    )
    .expect_err("negative rate");
    assert!(matches!(err, LeaveError::InvalidRate { .. }));
}

#[test]
fn empty_range_yields_no_rows() {
    let employee = Employee::new("E1", "Ada", dec!(15), dec!(1));
    let months: Vec<YearMonth> = Vec::new();
    let builder = LedgerBuilder::new(
        &employee,
        dec!(4),
        months,
        std::iter::empty::<&LeaveApplication>(),
    )
    .expect("empty range");

    assert_eq!(builder.rows().count(), 0);
    assert_eq!(builder.closing_balance(), dec!(4));
    assert!(builder.statement().is_empty());
}
