//! Accrual scheduling.
//!
//! This module generates the ordered accrual events of a category between two
//! dates. Periodic events are capped per calendar year by folding a
//! [`YearlyAccrual`] accumulator over them; the accumulator is returned so a
//! later range can continue from it.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualFrequency, CategoryConfig};

/// The kind of a scheduled event.
///
/// The ordering is the tie-break order for events on the same day: the annual
/// grant is applied before periodic accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The January 1st grant, outside the yearly cap.
    AnnualGrant,
    /// Periodic accrual, subject to the yearly cap.
    Periodic,
}

/// A single accrual event produced by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// The day the event is applied.
    pub date: NaiveDate,
    /// Grant or periodic accrual.
    pub kind: EventKind,
    /// The full amount before the yearly cap.
    pub requested: Decimal,
    /// The amount actually added after the yearly cap.
    pub amount: Decimal,
}

impl ScheduledEvent {
    /// Returns true if the yearly cap reduced this event.
    pub fn was_capped(&self) -> bool {
        self.amount < self.requested
    }
}

/// Running total of periodic accrual for one calendar year.
///
/// # Example
///
/// ```
/// use pto_engine::calculation::YearlyAccrual;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let cap = Some(Decimal::new(15, 0));
/// let ten = Decimal::new(10, 0);
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
///
/// let acc = YearlyAccrual::new(2024, Decimal::ZERO);
/// let (acc, first) = acc.apply(day(7), ten, cap);
/// let (acc, second) = acc.apply(day(14), ten, cap);
/// let (acc, third) = acc.apply(day(21), ten, cap);
///
/// assert_eq!((first, second, third), (ten, Decimal::new(5, 0), Decimal::ZERO));
/// assert_eq!(acc.accrued, Decimal::new(15, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAccrual {
    /// The calendar year being tracked.
    pub year: i32,
    /// Periodic hours accrued so far in `year`.
    pub accrued: Decimal,
}

impl YearlyAccrual {
    /// Creates an accumulator for a year.
    pub fn new(year: i32, accrued: Decimal) -> Self {
        Self { year, accrued }
    }

    /// The accumulator in effect on a category's start date, seeded with the
    /// hours already accrued that year.
    pub fn opening(config: &CategoryConfig) -> Self {
        let year = config.start_date.map_or(0, |date| date.year());
        Self::new(year, config.accrued_ytd)
    }

    /// Applies one periodic accrual, returning the updated accumulator and
    /// the amount granted.
    ///
    /// The total resets when `date` falls in a different year. With a cap,
    /// the grant is clamped to the remaining headroom, never below zero.
    pub fn apply(
        self,
        date: NaiveDate,
        requested: Decimal,
        cap: Option<Decimal>,
    ) -> (Self, Decimal) {
        let current = if date.year() == self.year {
            self
        } else {
            Self::new(date.year(), Decimal::ZERO)
        };

        let granted = match cap {
            Some(cap) => requested.min((cap - current.accrued).max(Decimal::ZERO)),
            None => requested,
        };

        (Self::new(current.year, current.accrued + granted), granted)
    }

    /// Returns the accrued total for `year`, zero if the accumulator tracks
    /// another year.
    pub fn accrued_in(&self, year: i32) -> Decimal {
        if year == self.year {
            self.accrued
        } else {
            Decimal::ZERO
        }
    }
}

/// The events scheduled over a range, with the accumulator after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Events in application order.
    pub events: Vec<ScheduledEvent>,
    /// The yearly accumulator after the last periodic event.
    pub yearly: YearlyAccrual,
}

impl Schedule {
    /// Returns the total hours the schedule adds.
    pub fn total(&self) -> Decimal {
        self.events.iter().map(|e| e.amount).sum()
    }
}

/// Generates the accrual events of a category within `[from, to]`.
///
/// # Rules
///
/// - **daily**: every day on or after the start date
/// - **weekly**: every Sunday on or after the start date
/// - **biweekly**: every 14 days after the start date, the start date excluded
/// - **monthly**: the 1st of each month after the start date
/// - **annually**: each January 1st after the start date
/// - **annual grant**: each January 1st after the start date, uncapped,
///   ordered before a periodic event on the same day
///
/// With `skip_grant_week`, weekly events in the first seven days of a year
/// that paid a grant are dropped.
///
/// # Errors
///
/// - `MissingConfig` if a frequency or grant is set without a start date
/// - `InvalidRange` if `from` is after `to`
///
/// # Example
///
/// ```
/// use pto_engine::calculation::{schedule, YearlyAccrual};
/// use pto_engine::models::{AccrualFrequency, CategoryConfig};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = CategoryConfig {
///     accrual_rate: Decimal::new(2, 0),
///     accrual_frequency: Some(AccrualFrequency::Weekly),
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     ..CategoryConfig::new("Weekly PTO")
/// };
///
/// let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
/// let result = schedule(&config, from, to, YearlyAccrual::opening(&config)).unwrap();
///
/// assert_eq!(result.events.len(), 3);
/// assert_eq!(result.total(), Decimal::new(6, 0));
/// ```
pub fn schedule(
    config: &CategoryConfig,
    from: NaiveDate,
    to: NaiveDate,
    yearly: YearlyAccrual,
) -> EngineResult<Schedule> {
    config.validate()?;
    if from > to {
        return Err(EngineError::InvalidRange { from, to });
    }

    let Some(start) = config.start_date else {
        return Ok(Schedule {
            events: Vec::new(),
            yearly,
        });
    };

    let grants: Vec<ScheduledEvent> = match config.annual_grant() {
        Some(amount) => new_years_after(start, from, to)
            .into_iter()
            .map(|date| ScheduledEvent {
                date,
                kind: EventKind::AnnualGrant,
                requested: amount,
                amount,
            })
            .collect(),
        None => Vec::new(),
    };

    let periodic_dates = match config.accrual_frequency {
        Some(frequency) if config.has_periodic_accrual() => {
            periodic_occurrences(frequency, start, from, to)
        }
        _ => Vec::new(),
    };

    let (periodic, yearly) = periodic_dates
        .into_iter()
        .filter(|date| !in_skipped_grant_week(config, start, *date))
        .fold((Vec::new(), yearly), |(mut events, acc), date| {
            let (acc, amount) = acc.apply(date, config.accrual_rate, config.yearly_accrual_cap);
            events.push(ScheduledEvent {
                date,
                kind: EventKind::Periodic,
                requested: config.accrual_rate,
                amount,
            });
            (events, acc)
        });

    let mut events = grants;
    events.extend(periodic);
    events.sort_by_key(|event| (event.date, event.kind));

    debug!(
        category = %config.name,
        %from,
        %to,
        events = events.len(),
        accrued_ytd = %yearly.accrued,
        "Scheduled accrual events"
    );

    Ok(Schedule { events, yearly })
}

/// Dates a periodic accrual falls on within `[from, to]`.
fn periodic_occurrences(
    frequency: AccrualFrequency,
    start: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NaiveDate> {
    let lower = from.max(start);
    if lower > to {
        return Vec::new();
    }

    match frequency {
        AccrualFrequency::Daily => stepping(Some(lower), to, Days::new(1)),
        AccrualFrequency::Weekly => {
            let offset = (7 - lower.weekday().num_days_from_sunday()) % 7;
            stepping(lower.checked_add_days(Days::new(offset.into())), to, Days::new(7))
        }
        AccrualFrequency::Biweekly => {
            let elapsed = (lower - start).num_days();
            let periods = ((elapsed + 13) / 14).max(1);
            let first = start.checked_add_days(Days::new((periods * 14) as u64));
            stepping(first, to, Days::new(14))
        }
        AccrualFrequency::Monthly => {
            let month_start = lower.with_day(1);
            let first = month_start.and_then(|date| {
                if date < lower || date <= start {
                    date.checked_add_months(Months::new(1))
                } else {
                    Some(date)
                }
            });
            std::iter::successors(first, |date| date.checked_add_months(Months::new(1)))
                .take_while(|date| *date <= to)
                .collect()
        }
        AccrualFrequency::Annually => new_years_after(start, from, to),
    }
}

fn stepping(first: Option<NaiveDate>, to: NaiveDate, step: Days) -> Vec<NaiveDate> {
    std::iter::successors(first, |date| date.checked_add_days(step))
        .take_while(|date| *date <= to)
        .collect()
}

/// January 1sts strictly after `start` within `[from, to]`.
fn new_years_after(start: NaiveDate, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    (from.year()..=to.year())
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .filter(|date| *date > start && *date >= from && *date <= to)
        .collect()
}

fn in_skipped_grant_week(config: &CategoryConfig, start: NaiveDate, date: NaiveDate) -> bool {
    if !config.skip_grant_week
        || config.annual_grant().is_none()
        || config.accrual_frequency != Some(AccrualFrequency::Weekly)
    {
        return false;
    }

    NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .is_some_and(|new_year| new_year > start && (date - new_year).num_days() < 7)
}
