//! Ledger entry model.
//!
//! A ledger entry is a dated, signed hour adjustment against a category:
//! usage, a manual correction, or an accrual derived from a worked shift.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a ledger entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Logged by the user (usage or adjustment).
    Manual,
    /// Generated from a worked shift.
    ShiftAuto,
}

/// A dated, signed hour adjustment against a category.
///
/// # Example
///
/// ```
/// use pto_engine::models::{EntrySource, LedgerEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = LedgerEntry::manual(
///     "log_001",
///     "vacation",
///     NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
///     Decimal::new(-8, 0),
/// );
/// assert_eq!(entry.source, EntrySource::Manual);
/// assert!(entry.is_usage());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier of the log or shift this entry was generated from.
    pub id: String,
    /// The category this entry applies to.
    pub category_id: String,
    /// The day the entry takes effect.
    pub date: NaiveDate,
    /// Signed hours: negative for usage, positive for adjustments and grants.
    pub amount: Decimal,
    /// Where the entry came from.
    pub source: EntrySource,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl LedgerEntry {
    /// Creates a manual entry without a note.
    pub fn manual(
        id: impl Into<String>,
        category_id: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            date,
            amount,
            source: EntrySource::Manual,
            note: None,
        }
    }

    /// Returns true if the entry reduces the balance.
    pub fn is_usage(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_entry_is_not_usage() {
        let entry = LedgerEntry::manual(
            "log_002",
            "vacation",
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            Decimal::new(5, 0),
        );
        assert!(!entry.is_usage());
        assert!(entry.note.is_none());
    }

    #[test]
    fn test_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&EntrySource::ShiftAuto).unwrap(),
            "\"shift_auto\""
        );
        assert_eq!(
            serde_json::to_string(&EntrySource::Manual).unwrap(),
            "\"manual\""
        );
    }

    #[test]
    fn test_entry_deserialization() {
        let json = r#"{
            "id": "log_001",
            "category_id": "upt",
            "date": "2024-02-15",
            "amount": "-10",
            "source": "manual",
            "note": "Called out sick"
        }"#;

        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.amount, Decimal::new(-10, 0));
        assert_eq!(entry.note.as_deref(), Some("Called out sick"));
    }
}
