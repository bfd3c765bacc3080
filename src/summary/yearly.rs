use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::LedgerRow;

use super::department::LedgerTotals;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub months: usize,
    pub totals: LedgerTotals,
}

/// Rolls ledger rows up per calendar year, in year order.
///
/// Each year opens with its first row's `balance_bf` and closes with its last row's `balance_cf`.
pub fn by_year<'a, I>(rows: I) -> Vec<YearSummary>
where
    I: IntoIterator<Item = &'a LedgerRow>,
{
    let mut years: BTreeMap<i32, Vec<&LedgerRow>> = BTreeMap::new();
    for row in rows {
        years.entry(row.period.year()).or_default().push(row);
    }

    years
        .into_iter()
        .filter_map(|(year, mut rows)| {
            rows.sort_by_key(|row| row.period);
            let months = rows.len();
            LedgerTotals::from_rows(rows).map(|totals| YearSummary {
                year,
                months,
                totals,
            })
        })
        .collect()
}
