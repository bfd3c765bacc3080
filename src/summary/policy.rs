//! Classification policies for utilization and low-balance reports.
//!
//! The percentage policy and the absolute-days policy are independent; neither is
//! derived from the other.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Critical,
    Warning,
    Healthy,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Critical => "critical",
            Band::Warning => "warning",
            Band::Healthy => "healthy",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Share of the annual entitlement already consumed, in percent.
///
/// A zero entitlement yields `0` instead of dividing by zero.
pub fn utilization_percentage(entitlement: Decimal, balance_cf: Decimal) -> Decimal {
    if entitlement.is_zero() {
        return Decimal::ZERO;
    }
    (entitlement - balance_cf) / entitlement * Decimal::ONE_HUNDRED
}

/// Bands utilization percentages: `>= critical_at` is critical, `>= warning_at` is warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UtilizationPolicy {
    pub critical_at: Decimal,
    pub warning_at: Decimal,
}

impl Default for UtilizationPolicy {
    fn default() -> Self {
        Self {
            critical_at: dec!(90),
            warning_at: dec!(75),
        }
    }
}

impl UtilizationPolicy {
    pub fn classify(&self, utilization: Decimal) -> Band {
        if utilization >= self.critical_at {
            Band::Critical
        } else if utilization >= self.warning_at {
            Band::Warning
        } else {
            Band::Healthy
        }
    }
}

/// Bands remaining days: `<= critical_at_or_below` is critical, `<= threshold` is warning.
///
/// The critical cutoff never exceeds the threshold, so every critical balance is also low.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdPolicy {
    pub threshold: Decimal,
    pub critical_at_or_below: Decimal,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            threshold: dec!(5),
            critical_at_or_below: dec!(2),
        }
    }
}

impl ThresholdPolicy {
    pub fn with_threshold(threshold: Decimal) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn critical_cutoff(&self) -> Decimal {
        self.critical_at_or_below.min(self.threshold)
    }

    pub fn classify(&self, balance: Decimal) -> Band {
        if balance <= self.critical_cutoff() {
            Band::Critical
        } else if balance <= self.threshold {
            Band::Warning
        } else {
            Band::Healthy
        }
    }

    /// Whether the balance belongs on the low-balance warning list.
    pub fn is_low(&self, balance: Decimal) -> bool {
        balance <= self.threshold
    }
}
