//! Per-category ledger.
//!
//! The ledger is the chronologically sorted list of entries for one category,
//! merging manual logs with entries derived from worked shifts. Same-day
//! entries keep their insertion order.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{EntrySource, LedgerEntry, PtoCategory, WorkShift};

use super::shift_accrual::shift_entry;

/// The sorted ledger of a single category.
///
/// Balances are always recomputed from the ledger; deleting a log or shift
/// means removing its entry here and simulating again.
///
/// Deserialization goes through [`Ledger::from_entries`], so a stored ledger
/// is re-sorted and rejected if it holds another category's entries.
///
/// # Example
///
/// ```
/// use pto_engine::calculation::Ledger;
/// use pto_engine::models::LedgerEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut ledger = Ledger::new("vacation");
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
///
/// ledger.insert(LedgerEntry::manual("b", "vacation", day(20), Decimal::new(-5, 0))).unwrap();
/// ledger.insert(LedgerEntry::manual("a", "vacation", day(10), Decimal::new(-3, 0))).unwrap();
///
/// assert_eq!(ledger.entries()[0].id, "a");
/// assert_eq!(ledger.total_through(day(15)), Decimal::new(-3, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord")]
pub struct Ledger {
    category_id: String,
    entries: Vec<LedgerEntry>,
}

/// Serialized form of a [`Ledger`], checked on the way in.
#[derive(Deserialize)]
struct LedgerRecord {
    category_id: String,
    #[serde(default)]
    entries: Vec<LedgerEntry>,
}

impl TryFrom<LedgerRecord> for Ledger {
    type Error = EngineError;

    fn try_from(record: LedgerRecord) -> EngineResult<Self> {
        Self::from_entries(record.category_id, record.entries)
    }
}

impl Ledger {
    /// Creates an empty ledger for a category.
    pub fn new(category_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            entries: Vec::new(),
        }
    }

    /// Builds a ledger from entries that all belong to the category.
    pub fn from_entries(
        category_id: impl Into<String>,
        entries: impl IntoIterator<Item = LedgerEntry>,
    ) -> EngineResult<Self> {
        let mut ledger = Self::new(category_id);
        for entry in entries {
            ledger.insert(entry)?;
        }
        Ok(ledger)
    }

    /// Merges manual logs and worked shifts into the ledger of a category.
    ///
    /// Logs for other categories are ignored. Shifts only produce entries
    /// when the category is shift-linked; malformed shifts are skipped.
    /// A stored shift-derived log is replaced by the entry regenerated from
    /// its shift, so each shift counts once.
    pub fn merge(
        category: &PtoCategory,
        logs: &[LedgerEntry],
        shifts: &[WorkShift],
    ) -> EngineResult<Self> {
        let mut ledger = Self::new(category.id.clone());

        let regenerated: HashSet<&str> = match category.config.shift_accrual {
            Some(_) => shifts.iter().map(|shift| shift.id.as_str()).collect(),
            None => HashSet::new(),
        };

        for log in logs.iter().filter(|log| log.category_id == category.id) {
            if log.source == EntrySource::ShiftAuto && regenerated.contains(log.id.as_str()) {
                continue;
            }
            ledger.insert(log.clone())?;
        }

        if let Some(policy) = category.config.shift_accrual {
            for shift in shifts {
                match shift_entry(&category.id, shift, policy) {
                    Ok(Some(entry)) => ledger.insert(entry)?,
                    Ok(None) => {}
                    Err(err) => {
                        warn!(
                            category_id = %category.id,
                            shift_id = %shift.id,
                            error = %err,
                            "Skipping shift"
                        );
                    }
                }
            }
        }

        Ok(ledger)
    }

    /// Inserts an entry after every entry dated on or before it.
    pub fn insert(&mut self, entry: LedgerEntry) -> EngineResult<()> {
        if entry.category_id != self.category_id {
            return Err(EngineError::CategoryMismatch {
                expected: self.category_id.clone(),
                found: entry.category_id,
            });
        }

        let position = self.entries.partition_point(|e| e.date <= entry.date);
        self.entries.insert(position, entry);
        Ok(())
    }

    /// Removes the entry generated by a deleted log or shift.
    pub fn remove(&mut self, id: &str, source: EntrySource) -> Option<LedgerEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id && e.source == source)?;
        Some(self.entries.remove(position))
    }

    /// Returns the category this ledger belongs to.
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// Returns all entries in date order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Returns the entries dated on or before `date`.
    pub fn entries_through(&self, date: NaiveDate) -> &[LedgerEntry] {
        let end = self.entries.partition_point(|e| e.date <= date);
        &self.entries[..end]
    }

    /// Returns the sum of entries dated on or before `date`.
    pub fn total_through(&self, date: NaiveDate) -> Decimal {
        self.entries_through(date).iter().map(|e| e.amount).sum()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
