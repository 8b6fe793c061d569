//! Work shift model and related types.
//!
//! This module defines the [`WorkShift`] and [`Break`] structs. Shifts are the
//! source of automatic ledger entries for shift-linked categories.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a break taken during a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {
    /// The start time of the break.
    pub start_time: NaiveDateTime,
    /// The end time of the break.
    pub end_time: NaiveDateTime,
    /// Whether the break is paid (true) or unpaid (false).
    pub is_paid: bool,
}

impl Break {
    fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// A worked shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkShift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The start time of the shift.
    pub start_time: NaiveDateTime,
    /// The end time of the shift.
    pub end_time: NaiveDateTime,
    /// Breaks taken during the shift.
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl WorkShift {
    /// Calculates the total worked hours for the shift.
    ///
    /// Unpaid breaks are subtracted; paid breaks count as worked time.
    ///
    /// # Examples
    ///
    /// ```
    /// use pto_engine::models::WorkShift;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
    /// let shift = WorkShift {
    ///     id: "shift_001".to_string(),
    ///     start_time: at("2024-03-04 07:00:00"),
    ///     end_time: at("2024-03-04 17:00:00"),
    ///     breaks: vec![],
    /// };
    /// assert_eq!(shift.worked_hours(), Decimal::new(10, 0));
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        let total_minutes = (self.end_time - self.start_time).num_minutes();

        let unpaid_break_minutes: i64 = self
            .breaks
            .iter()
            .filter(|b| !b.is_paid)
            .map(|b| b.duration_minutes())
            .sum();

        Decimal::new(total_minutes - unpaid_break_minutes, 0) / Decimal::new(60, 0)
    }

    /// Returns the calendar date the shift starts on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Returns true if the shift ends after it starts.
    pub fn is_well_formed(&self) -> bool {
        self.end_time > self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_shift(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> WorkShift {
        WorkShift {
            id: id.to_string(),
            start_time: start,
            end_time: end,
            breaks: vec![],
        }
    }

    /// WS-001: 10 hour shift no breaks
    #[test]
    fn test_ws_001_ten_hour_shift() {
        let shift = make_shift(
            "WS-001",
            make_datetime("2024-03-04", "07:00:00"),
            make_datetime("2024-03-04", "17:00:00"),
        );
        assert_eq!(shift.worked_hours(), Decimal::new(10, 0));
        assert!(shift.is_well_formed());
    }

    /// WS-002: unpaid break is subtracted, paid break is not
    #[test]
    fn test_ws_002_breaks() {
        let mut shift = make_shift(
            "WS-002",
            make_datetime("2024-03-04", "07:00:00"),
            make_datetime("2024-03-04", "17:30:00"),
        );
        shift.breaks = vec![
            Break {
                start_time: make_datetime("2024-03-04", "12:00:00"),
                end_time: make_datetime("2024-03-04", "12:30:00"),
                is_paid: false,
            },
            Break {
                start_time: make_datetime("2024-03-04", "15:00:00"),
                end_time: make_datetime("2024-03-04", "15:15:00"),
                is_paid: true,
            },
        ];

        assert_eq!(shift.worked_hours(), Decimal::new(10, 0));
    }

    /// WS-003: overnight shift belongs to its start date
    #[test]
    fn test_ws_003_overnight_shift() {
        let shift = make_shift(
            "WS-003",
            make_datetime("2024-03-04", "22:00:00"),
            make_datetime("2024-03-05", "08:00:00"),
        );

        assert_eq!(shift.worked_hours(), Decimal::new(10, 0));
        assert_eq!(shift.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    /// WS-004: zero and negative duration shifts are not well formed
    #[test]
    fn test_ws_004_malformed_shift() {
        let start = make_datetime("2024-03-04", "09:00:00");
        assert!(!make_shift("zero", start, start).is_well_formed());
        let reversed = make_shift("reversed", start, make_datetime("2024-03-04", "08:00:00"));
        assert!(!reversed.is_well_formed());
    }

    #[test]
    fn test_shift_deserialization_defaults_breaks() {
        let json = r#"{
            "id": "shift_001",
            "start_time": "2024-03-04T07:00:00",
            "end_time": "2024-03-04T17:00:00"
        }"#;

        let shift: WorkShift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.id, "shift_001");
        assert!(shift.breaks.is_empty());
    }
}
