use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    department::EmployeeBalance,
    policy::{Band, ThresholdPolicy},
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandCounts {
    pub critical: usize,
    pub warning: usize,
    pub healthy: usize,
}

impl BandCounts {
    pub fn record(&mut self, band: Band) {
        match band {
            Band::Critical => self.critical += 1,
            Band::Warning => self.warning += 1,
            Band::Healthy => self.healthy += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.healthy
    }
}

impl FromIterator<Band> for BandCounts {
    fn from_iter<I: IntoIterator<Item = Band>>(iter: I) -> Self {
        let mut counts = BandCounts::default();
        for band in iter {
            counts.record(band);
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEntry {
    pub code: String,
    pub name: String,
    pub department: String,
    pub balance_cf: Decimal,
    pub band: Band,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningReport {
    pub policy: ThresholdPolicy,
    /// Employees at or below the threshold, lowest balance first.
    pub entries: Vec<WarningEntry>,
    /// Band counts across every employee considered.
    pub counts: BandCounts,
}

pub fn warnings<'a, I>(balances: I, policy: &ThresholdPolicy) -> WarningReport
where
    I: IntoIterator<Item = &'a EmployeeBalance>,
{
    let mut counts = BandCounts::default();
    let mut entries = Vec::new();

    for balance in balances {
        let closing = balance.totals.balance_cf;
        let band = policy.classify(closing);
        counts.record(band);
        if policy.is_low(closing) {
            entries.push(WarningEntry {
                code: balance.code.clone(),
                name: balance.name.clone(),
                department: balance.department_key().to_string(),
                balance_cf: closing,
                band,
            });
        }
    }

    entries.sort_by(|a, b| a.balance_cf.cmp(&b.balance_cf).then(a.code.cmp(&b.code)));
    WarningReport {
        policy: *policy,
        entries,
        counts,
    }
}
