//! Roll-ups by department and year, utilization bands, and low-balance warnings.

pub mod department;
pub mod policy;
pub mod warnings;
pub mod yearly;

pub use department::{by_department, grand_total, DepartmentSummary, EmployeeBalance, LedgerTotals};
pub use policy::{utilization_percentage, Band, ThresholdPolicy, UtilizationPolicy};
pub use warnings::{warnings, BandCounts, WarningEntry, WarningReport};
pub use yearly::{by_year, YearSummary};
