//! Command-line front end printing leave reports from a snapshot file.

pub mod commands;
pub mod output;
pub mod table;

use thiserror::Error;

use crate::errors::LeaveError;

pub use commands::{run, usage};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Leave(#[from] LeaveError),
}
