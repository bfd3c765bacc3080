//! Input records supplied by the HR/payroll data layer.

pub mod application;
pub mod balance;
pub mod employee;
pub mod period;
pub mod snapshot;

pub use application::LeaveApplication;
pub use balance::LeaveBalancePeriod;
pub use employee::{Employee, UNASSIGNED_DEPARTMENT};
pub use period::YearMonth;
pub use snapshot::LeaveSnapshot;
