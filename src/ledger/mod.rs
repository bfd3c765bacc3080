//! Leave balance ledger: accrual, deductions, per-month rows, statements, reconciliation.

pub mod accrual;
pub mod builder;
pub mod deduction;
pub mod reconcile;
pub mod statement;

pub use accrual::{accrual_for, validate_rate};
pub use builder::{LedgerBuilder, LedgerRow, LedgerRows};
pub use deduction::{deduct, DeductionOutcome, DeductionStep};
pub use reconcile::{check_periods, reconcile, Discrepancy, DiscrepancyKind};
pub use statement::StatementEntry;
