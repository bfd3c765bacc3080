//! Checks persisted balance rows for conservation and continuity breaks, and against
//! the approved applications they should reflect.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{LeaveBalancePeriod, LeaveSnapshot, YearMonth};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// `balance_cf` differs from `balance_bf + days_accrued - days_taken`.
    Conservation { expected: Decimal, recorded: Decimal },
    /// `balance_bf` differs from the previous month's `balance_cf`.
    Continuity { expected: Decimal, recorded: Decimal },
    /// Recorded `days_taken` differs from the approved applications charged to the month.
    DaysTaken { applications: Decimal, recorded: Decimal },
    /// A month is missing between two persisted rows.
    MissingPeriod { previous: YearMonth },
    DuplicatePeriod,
    /// Approved applications are charged to a month that has no balance row.
    UnpostedApplications { applications: Decimal },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discrepancy {
    pub employee_code: String,
    pub period: YearMonth,
    pub kind: DiscrepancyKind,
}

/// Checks conservation, continuity, and month gaps across persisted rows.
///
/// Rows are grouped per employee and checked in month order. Results are ordered by
/// employee code, then month.
pub fn check_periods<'a, I>(periods: I) -> Vec<Discrepancy>
where
    I: IntoIterator<Item = &'a LeaveBalancePeriod>,
{
    let mut by_employee: BTreeMap<&str, Vec<&LeaveBalancePeriod>> = BTreeMap::new();
    for row in periods {
        by_employee
            .entry(row.employee_code.as_str())
            .or_default()
            .push(row);
    }

    let mut found = Vec::new();
    for (code, mut rows) in by_employee {
        rows.sort_by_key(|row| row.period);
        let mut previous: Option<&LeaveBalancePeriod> = None;

        for row in rows {
            if !row.is_conserved() {
                found.push(discrepancy(
                    code,
                    row.period,
                    DiscrepancyKind::Conservation {
                        expected: row.expected_cf(),
                        recorded: row.balance_cf,
                    },
                ));
            }

            if let Some(prev) = previous {
                if prev.period == row.period {
                    found.push(discrepancy(code, row.period, DiscrepancyKind::DuplicatePeriod));
                    continue;
                }
                if prev.period.succ() != row.period {
                    found.push(discrepancy(
                        code,
                        prev.period.succ(),
                        DiscrepancyKind::MissingPeriod {
                            previous: prev.period,
                        },
                    ));
                } else if prev.balance_cf != row.balance_bf {
                    found.push(discrepancy(
                        code,
                        row.period,
                        DiscrepancyKind::Continuity {
                            expected: prev.balance_cf,
                            recorded: row.balance_bf,
                        },
                    ));
                }
            }
            previous = Some(row);
        }
    }
    found
}

/// Full reconciliation of a snapshot: period checks plus days taken against applications.
pub fn reconcile(snapshot: &LeaveSnapshot) -> Vec<Discrepancy> {
    let mut found = check_periods(&snapshot.periods);

    let mut charged: BTreeMap<(&str, YearMonth), Decimal> = BTreeMap::new();
    for application in &snapshot.applications {
        *charged
            .entry((application.employee_code.as_str(), application.period()))
            .or_default() += application.total_days;
    }

    for row in &snapshot.periods {
        let applications = charged
            .get(&(row.employee_code.as_str(), row.period))
            .copied()
            .unwrap_or(Decimal::ZERO);
        if applications != row.days_taken {
            found.push(discrepancy(
                &row.employee_code,
                row.period,
                DiscrepancyKind::DaysTaken {
                    applications,
                    recorded: row.days_taken,
                },
            ));
        }
    }

    let posted: BTreeSet<(&str, YearMonth)> = snapshot
        .periods
        .iter()
        .map(|row| (row.employee_code.as_str(), row.period))
        .collect();
    for ((code, period), applications) in charged {
        if posted.contains(&(code, period)) {
            continue;
        }
        found.push(discrepancy(
            code,
            period,
            DiscrepancyKind::UnpostedApplications { applications },
        ));
    }

    found.sort_by(|a, b| {
        a.employee_code
            .cmp(&b.employee_code)
            .then(a.period.cmp(&b.period))
    });

    if found.is_empty() {
        tracing::debug!(rows = snapshot.periods.len(), "leave balances reconcile");
    } else {
        tracing::info!(
            rows = snapshot.periods.len(),
            discrepancies = found.len(),
            "leave balance reconciliation found breaks"
        );
    }
    found
}

fn discrepancy(code: &str, period: YearMonth, kind: DiscrepancyKind) -> Discrepancy {
    Discrepancy {
        employee_code: code.to_string(),
        period,
        kind,
    }
}
