#![doc(test(attr(deny(warnings))))]

//! Leave Ledger reconciles monthly leave balances: accrual, approved applications,
//! per-month ledger rows, and department/year roll-ups for leave reports.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod summary;
pub mod utils;

pub use errors::{LeaveError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Leave ledger tracing initialized.");
    });
}
