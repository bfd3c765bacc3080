//! Applies approved leave applications against a running balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::LeaveApplication,
    errors::{LeaveError, Result},
};

/// One application charged against the running balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeductionStep {
    pub application_id: u64,
    pub leave_type: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub days: Decimal,
    /// Running balance after this application.
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeductionOutcome {
    pub opening: Decimal,
    pub days_taken: Decimal,
    pub closing: Decimal,
    pub steps: Vec<DeductionStep>,
    /// Set when the running balance is below zero at any point.
    pub went_negative: bool,
}

/// Orders applications by `date_from`, breaking ties by ascending id.
pub fn sort_applications(applications: &mut [&LeaveApplication]) {
    applications.sort_by(|a, b| a.date_from.cmp(&b.date_from).then(a.id.cmp(&b.id)));
}

pub(crate) fn validate_days(application: &LeaveApplication) -> Result<()> {
    if application.total_days < Decimal::ZERO {
        return Err(LeaveError::InvalidDays {
            application: application.id,
            days: application.total_days,
        });
    }
    Ok(())
}

/// Deducts `applications` from `opening` in date order.
///
/// Overdrawn balances are returned as data with `went_negative` set; they are never rejected.
pub fn deduct<'a, I>(opening: Decimal, applications: I) -> Result<DeductionOutcome>
where
    I: IntoIterator<Item = &'a LeaveApplication>,
{
    let mut ordered: Vec<&LeaveApplication> = applications.into_iter().collect();
    for application in &ordered {
        validate_days(application)?;
    }
    sort_applications(&mut ordered);
    Ok(apply_sorted(opening, &ordered))
}

/// Fold over applications that are already validated and ordered.
pub(crate) fn apply_sorted(opening: Decimal, applications: &[&LeaveApplication]) -> DeductionOutcome {
    let mut running = opening;
    let mut went_negative = opening < Decimal::ZERO;
    let mut steps = Vec::with_capacity(applications.len());

    for application in applications {
        running -= application.total_days;
        went_negative |= running < Decimal::ZERO;
        steps.push(DeductionStep {
            application_id: application.id,
            leave_type: application.leave_type.clone(),
            date_from: application.date_from,
            date_to: application.date_to,
            days: application.total_days,
            balance: running,
            comments: application.comments.clone(),
        });
    }

    DeductionOutcome {
        opening,
        days_taken: opening - running,
        closing: running,
        steps,
        went_negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn application(id: u64, day: u32, days: Decimal) -> LeaveApplication {
        LeaveApplication {
            id,
            employee_code: "E1".into(),
            date_from: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            total_days: days,
            leave_type: "Annual".into(),
            comments: None,
        }
    }

    #[test]
    fn deducts_in_date_then_id_order() {
        let apps = vec![
            application(9, 20, dec!(1)),
            application(4, 10, dec!(2)),
            application(2, 10, dec!(0.5)),
        ];
        let outcome = deduct(dec!(10), &apps).unwrap();

        let order: Vec<u64> = outcome.steps.iter().map(|step| step.application_id).collect();
        assert_eq!(order, vec![2, 4, 9]);
        assert_eq!(outcome.steps[0].balance, dec!(9.5));
        assert_eq!(outcome.steps[1].balance, dec!(7.5));
        assert_eq!(outcome.closing, dec!(6.5));
        assert_eq!(outcome.days_taken, dec!(3.5));
        assert!(!outcome.went_negative);
    }

    #[test]
    fn overdrawn_balance_is_flagged_not_rejected() {
        let apps = vec![application(1, 5, dec!(4))];
        let outcome = deduct(dec!(1.5), &apps).unwrap();

        assert_eq!(outcome.closing, dec!(-2.5));
        assert!(outcome.went_negative);
    }

    #[test]
    fn negative_day_count_is_rejected() {
        let apps = vec![application(7, 5, dec!(-1))];
        let err = deduct(dec!(3), &apps).expect_err("negative days");
        assert!(matches!(err, LeaveError::InvalidDays { application: 7, .. }));
    }

    #[test]
    fn no_applications_leaves_balance_untouched() {
        let outcome = deduct(dec!(3.25), std::iter::empty::<&LeaveApplication>()).unwrap();
        assert_eq!(outcome.closing, dec!(3.25));
        assert_eq!(outcome.days_taken, Decimal::ZERO);
        assert!(outcome.steps.is_empty());
    }
}
