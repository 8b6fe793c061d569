//! Balance output models.
//!
//! These are the values handed back to the caller after a balance or
//! forecast query.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A category balance at the end of a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// The day.
    pub date: NaiveDate,
    /// The balance after everything dated that day was applied.
    pub balance: Decimal,
}

/// The current balance of a category together with its projection.
///
/// # Example
///
/// ```
/// use pto_engine::models::{BalancePoint, BalanceReport};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let report = BalanceReport {
///     category_id: "flex".to_string(),
///     as_of: today,
///     current_balance: Decimal::new(2035, 2),
///     accrued_ytd: Decimal::new(3885, 2),
///     projected_balance: vec![BalancePoint { date: today, balance: Decimal::new(2035, 2) }],
/// };
/// assert_eq!(report.final_balance(), Decimal::new(2035, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// The category the report is for.
    pub category_id: String,
    /// The "today" the report was computed for.
    pub as_of: NaiveDate,
    /// Balance at the end of `as_of`.
    pub current_balance: Decimal,
    /// Periodic accrual counted against the yearly cap in `as_of`'s year.
    pub accrued_ytd: Decimal,
    /// Daily projection from `as_of` through the forecast horizon.
    pub projected_balance: Vec<BalancePoint>,
}

impl BalanceReport {
    /// Returns the last projected balance, or the current balance if the
    /// projection is empty.
    pub fn final_balance(&self) -> Decimal {
        self.projected_balance
            .last()
            .map(|point| point.balance)
            .unwrap_or(self.current_balance)
    }
}
