//! Shift-linked accrual.
//!
//! Shift-linked categories earn a fixed number of minutes per hour worked.
//! Each qualifying shift becomes one automatic ledger entry dated on the
//! shift's start date.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{EntrySource, LedgerEntry, ShiftAccrual, WorkShift, format_hours};

/// Calculates the hours earned for a number of hours worked.
///
/// # Examples
///
/// ```
/// use pto_engine::calculation::shift_accrual_amount;
/// use rust_decimal::Decimal;
///
/// // 12 hours at 5 minutes per hour earns exactly one hour
/// let earned = shift_accrual_amount(Decimal::new(12, 0), Decimal::new(5, 0));
/// assert_eq!(earned, Decimal::ONE);
/// ```
pub fn shift_accrual_amount(hours_worked: Decimal, minutes_per_hour: Decimal) -> Decimal {
    hours_worked * minutes_per_hour / Decimal::new(60, 0)
}

/// Builds the automatic ledger entry for a worked shift.
///
/// # Returns
///
/// - `Err(InvalidShift)` if the shift does not end after it starts
/// - `Ok(None)` if the shift earns nothing (e.g. all unpaid break)
/// - `Ok(Some(entry))` with a [`EntrySource::ShiftAuto`] entry otherwise
pub fn shift_entry(
    category_id: &str,
    shift: &WorkShift,
    policy: ShiftAccrual,
) -> EngineResult<Option<LedgerEntry>> {
    if !shift.is_well_formed() {
        return Err(EngineError::InvalidShift {
            shift_id: shift.id.clone(),
            message: "end time must be after start time".to_string(),
        });
    }

    let worked = shift.worked_hours();
    let earned = shift_accrual_amount(worked, policy.minutes_per_hour);
    if earned <= Decimal::ZERO {
        return Ok(None);
    }

    Ok(Some(LedgerEntry {
        id: shift.id.clone(),
        category_id: category_id.to_string(),
        date: shift.date(),
        amount: earned,
        source: EntrySource::ShiftAuto,
        note: Some(format!("Auto-accrual from shift ({})", format_hours(worked))),
    }))
}
