//! Snapshot-facing entry points used by report generation.

pub mod ledger_service;
pub mod report_service;

pub use ledger_service::LedgerService;
pub use report_service::{BalanceReport, ReportService, UtilizationLine};
