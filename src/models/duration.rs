//! Duration parsing and formatting.
//!
//! Users enter durations as `"1.5"`, `"1:30"` or `"1h 30m"`. This module turns
//! those strings into fractional hours and back.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Parses a human-entered duration into fractional hours.
///
/// Accepted forms (case-insensitive, whitespace ignored):
/// - plain decimal hours: `"1.5"`
/// - `H:MM`: `"1:30"`
/// - composite `<H>h<M>m`, either part optional: `"1h 30m"`, `"2h"`, `"45m"`
///
/// A leading `-` or `+` signs the whole value.
///
/// # Returns
///
/// - `Ok(None)` for empty or whitespace-only input
/// - `Ok(Some(hours))` for a valid duration
/// - `Err(InvalidDuration)` for anything else
///
/// # Examples
///
/// ```
/// use pto_engine::models::parse_duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_duration("1.5").unwrap(), Some(Decimal::new(15, 1)));
/// assert_eq!(parse_duration("1:30").unwrap(), Some(Decimal::new(15, 1)));
/// assert_eq!(parse_duration("1H 30m").unwrap(), Some(Decimal::new(15, 1)));
/// assert_eq!(parse_duration("   ").unwrap(), None);
/// assert!(parse_duration("soon").is_err());
/// ```
pub fn parse_duration(input: &str) -> EngineResult<Option<Decimal>> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    if compact.is_empty() {
        return Ok(None);
    }

    let invalid = |message: &str| EngineError::InvalidDuration {
        input: input.to_string(),
        message: message.to_string(),
    };

    let (negative, body) = match compact.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, compact.strip_prefix('+').unwrap_or(&compact)),
    };

    if body.is_empty() {
        return Err(invalid("missing value after sign"));
    }

    let hours = if let Some((h, m)) = body.split_once(':') {
        parse_colon(h, m).ok_or_else(|| invalid("expected H:MM with minutes 00-59"))?
    } else if body.contains(['h', 'm']) {
        parse_composite(body).map_err(|message| invalid(message))?
    } else {
        parse_number(body).ok_or_else(|| invalid("expected a number of hours"))?
    };

    Ok(Some(if negative { -hours } else { hours }))
}

/// Formats fractional hours as `"{H}h {M}m"`.
///
/// Minutes are rounded to the nearest whole minute, zero components are
/// omitted (zero itself is `"0h"`) and negative values carry a `-` prefix.
///
/// # Examples
///
/// ```
/// use pto_engine::models::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(15, 1)), "1h 30m");
/// assert_eq!(format_hours(Decimal::new(2, 0)), "2h");
/// assert_eq!(format_hours(Decimal::new(-25, 2)), "-15m");
/// assert_eq!(format_hours(Decimal::ZERO), "0h");
/// ```
pub fn format_hours(value: Decimal) -> String {
    let magnitude = value.abs();
    let mut hours = magnitude.trunc();
    let mut minutes = ((magnitude - hours) * MINUTES_PER_HOUR)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or_default();

    if minutes == 60 {
        hours += Decimal::ONE;
        minutes = 0;
    }

    let sign = if value.is_sign_negative() && (!hours.is_zero() || minutes > 0) {
        "-"
    } else {
        ""
    };

    match (hours.is_zero(), minutes) {
        (true, 0) => "0h".to_string(),
        (true, m) => format!("{}{}m", sign, m),
        (false, 0) => format!("{}{}h", sign, hours.normalize()),
        (false, m) => format!("{}{}h {}m", sign, hours.normalize(), m),
    }
}

/// A duration in fractional hours that parses from and displays as user text.
///
/// # Example
///
/// ```
/// use pto_engine::models::Hours;
/// use rust_decimal::Decimal;
///
/// let hours: Hours = "2:15".parse().unwrap();
/// assert_eq!(hours.0, Decimal::new(225, 2));
/// assert_eq!(hours.to_string(), "2h 15m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hours(pub Decimal);

impl FromStr for Hours {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)?
            .map(Hours)
            .ok_or_else(|| EngineError::InvalidDuration {
                input: s.to_string(),
                message: "empty duration".to_string(),
            })
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hours(self.0))
    }
}

impl From<Decimal> for Hours {
    fn from(value: Decimal) -> Self {
        Hours(value)
    }
}

/// Parses an unsigned decimal made of digits and at most one point.
fn parse_number(s: &str) -> Option<Decimal> {
    let valid = !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.chars().filter(|c| *c == '.').count() <= 1
        && s.chars().any(|c| c.is_ascii_digit());
    if !valid {
        return None;
    }

    let trimmed = s.trim_end_matches('.');
    if trimmed.starts_with('.') {
        Decimal::from_str(&format!("0{}", trimmed)).ok()
    } else {
        Decimal::from_str(trimmed).ok()
    }
}

fn parse_colon(hours: &str, minutes: &str) -> Option<Decimal> {
    if hours.is_empty() || !hours.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if minutes.is_empty() || minutes.len() > 2 || !minutes.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let h = Decimal::from_str(hours).ok()?;
    let m = Decimal::from_str(minutes).ok()?;
    if m >= MINUTES_PER_HOUR {
        return None;
    }
    Some(h + m / MINUTES_PER_HOUR)
}

fn parse_composite(body: &str) -> Result<Decimal, &'static str> {
    let (hours, rest) = match body.split_once('h') {
        Some((h, rest)) => (
            Some(parse_number(h).ok_or("expected a number before 'h'")?),
            rest,
        ),
        None => (None, body),
    };

    let minutes = if rest.is_empty() {
        None
    } else {
        let m = rest
            .strip_suffix('m')
            .ok_or("unexpected trailing number")?;
        Some(parse_number(m).ok_or("expected a number before 'm'")?)
    };

    if hours.is_none() && minutes.is_none() {
        return Err("expected hours or minutes");
    }

    Ok(hours.unwrap_or_default() + minutes.unwrap_or_default() / MINUTES_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn one_minute() -> Decimal {
        Decimal::ONE / MINUTES_PER_HOUR
    }

    /// DV-001: plain decimal
    #[test]
    fn test_dv_001_plain_decimal() {
        assert_eq!(parse_duration("1.5").unwrap(), Some(dec("1.5")));
        assert_eq!(parse_duration("8").unwrap(), Some(dec("8")));
        assert_eq!(parse_duration(".25").unwrap(), Some(dec("0.25")));
    }

    /// DV-002: colon form
    #[test]
    fn test_dv_002_colon_form() {
        assert_eq!(parse_duration("1:30").unwrap(), Some(dec("1.5")));
        assert_eq!(parse_duration("0:45").unwrap(), Some(dec("0.75")));
        assert_eq!(parse_duration("10:05").unwrap().unwrap(), dec("10") + dec("5") / dec("60"));
    }

    /// DV-003: composite forms with either part optional
    #[test]
    fn test_dv_003_composite_forms() {
        assert_eq!(parse_duration("1h30m").unwrap(), Some(dec("1.5")));
        assert_eq!(parse_duration("2h").unwrap(), Some(dec("2")));
        assert_eq!(parse_duration("45m").unwrap(), Some(dec("0.75")));
        assert_eq!(parse_duration("90m").unwrap(), Some(dec("1.5")));
        assert_eq!(parse_duration("1.5h").unwrap(), Some(dec("1.5")));
    }

    /// DV-004: case and whitespace are ignored
    #[test]
    fn test_dv_004_case_and_whitespace() {
        assert_eq!(parse_duration(" 1 H  30 M ").unwrap(), Some(dec("1.5")));
        assert_eq!(parse_duration("\t2:00\n").unwrap(), Some(dec("2")));
    }

    /// DV-005: empty input is no value
    #[test]
    fn test_dv_005_empty_is_none() {
        assert_eq!(parse_duration("").unwrap(), None);
        assert_eq!(parse_duration("   ").unwrap(), None);
    }

    /// DV-006: signed values
    #[test]
    fn test_dv_006_signed_values() {
        assert_eq!(parse_duration("-1h 30m").unwrap(), Some(dec("-1.5")));
        assert_eq!(parse_duration("-2").unwrap(), Some(dec("-2")));
        assert_eq!(parse_duration("+0:30").unwrap(), Some(dec("0.5")));
    }

    /// DV-007: malformed input is rejected
    #[test]
    fn test_dv_007_malformed_input() {
        let inputs = [
            "abc", "1h75", "1:75", "1:", ":30", "h", "m", "1.2.3", "-", "1x", "1m30h", "1e3",
        ];
        for input in inputs {
            match parse_duration(input) {
                Err(EngineError::InvalidDuration { input: raw, .. }) => assert_eq!(raw, input),
                other => panic!("Expected InvalidDuration for {:?}, got {:?}", input, other),
            }
        }
    }

    /// DV-008: formatting
    #[test]
    fn test_dv_008_formatting() {
        assert_eq!(format_hours(dec("1.5")), "1h 30m");
        assert_eq!(format_hours(dec("8")), "8h");
        assert_eq!(format_hours(dec("0.75")), "45m");
        assert_eq!(format_hours(dec("0")), "0h");
        assert_eq!(format_hours(dec("-1.5")), "-1h 30m");
        assert_eq!(format_hours(dec("12.0")), "12h");
    }

    /// DV-009: minutes round to the nearest whole minute
    #[test]
    fn test_dv_009_minute_rounding() {
        // 1.85h = 1h 51m
        assert_eq!(format_hours(dec("1.85")), "1h 51m");
        // 0.999h = 59.94m rounds up into the next hour
        assert_eq!(format_hours(dec("0.999")), "1h");
        // Less than half a minute disappears, including its sign
        assert_eq!(format_hours(dec("-0.001")), "0h");
    }

    #[test]
    fn test_hours_from_str_and_display() {
        let hours: Hours = "3h 20m".parse().unwrap();
        assert_eq!(hours.to_string(), "3h 20m");
        assert!("".parse::<Hours>().is_err());
    }

    #[test]
    fn test_round_trip_representative_values() {
        for s in ["0", "-1.5", "0.3333", "1.85", "7.7", "-0.75", "123.456"] {
            let x = dec(s);
            let back = parse_duration(&format_hours(x)).unwrap().unwrap();
            assert!((back - x).abs() <= one_minute(), "{} -> {}", x, back);
        }
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_is_within_a_minute(raw in -100_000_000i64..100_000_000i64) {
            let x = Decimal::new(raw, 4);
            let back = parse_duration(&format_hours(x)).unwrap().unwrap();
            prop_assert!((back - x).abs() <= one_minute());
        }
    }
}
