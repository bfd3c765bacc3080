//! Monthly accrual credited to an employee.

use rust_decimal::Decimal;

use crate::{
    domain::{Employee, YearMonth},
    errors::{LeaveError, Result},
};

/// Rejects negative accrual rates.
pub fn validate_rate(employee: &Employee) -> Result<()> {
    if employee.leave_accrual_rate < Decimal::ZERO {
        return Err(LeaveError::InvalidRate {
            employee: employee.code.clone(),
            rate: employee.leave_accrual_rate,
        });
    }
    Ok(())
}

/// Days accrued by `employee` for `month`.
///
/// The flat monthly rate applies from `accrual_start` onward; earlier months accrue zero.
pub fn accrual_for(employee: &Employee, month: YearMonth) -> Result<Decimal> {
    validate_rate(employee)?;
    Ok(monthly_accrual(employee, month))
}

/// Accrual for a rate that has already passed [`validate_rate`].
pub(crate) fn monthly_accrual(employee: &Employee, month: YearMonth) -> Decimal {
    match employee.accrual_start {
        Some(start) if month < start => Decimal::ZERO,
        _ => employee.leave_accrual_rate,
    }
}
