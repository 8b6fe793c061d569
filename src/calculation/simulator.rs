//! Balance simulation.
//!
//! This module walks a category's ledger and scheduled accrual events day by
//! day, applying the balance cap after every addition. The same primitive
//! backs the authoritative current balance and the forecast chart, so both
//! always agree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{BalancePoint, BalanceReport, CategoryConfig, PtoCategory};

use super::ledger::Ledger;
use super::scheduler::{YearlyAccrual, schedule};

/// Everything needed to continue a simulation from the end of a day.
///
/// The state is only meaningful together with the ledger snapshot it was
/// produced from: `entries_applied` counts entries of that ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceState {
    /// The running balance.
    pub balance: Decimal,
    /// The yearly periodic accrual accumulator.
    pub yearly: YearlyAccrual,
    /// Number of ledger entries already applied.
    pub entries_applied: usize,
}

impl BalanceState {
    /// The state before anything has been applied to a category.
    pub fn opening(config: &CategoryConfig) -> Self {
        Self {
            balance: config.starting_balance,
            yearly: YearlyAccrual::opening(config),
            entries_applied: 0,
        }
    }
}

/// Whether a simulation records the balance of every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesMode {
    /// Only the final state is returned.
    FinalOnly,
    /// One [`BalancePoint`] per simulated day is returned.
    Daily,
}

/// The result of simulating a range of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// The state at the end of the last day.
    pub state: BalanceState,
    /// Per-day balances, empty for [`SeriesMode::FinalOnly`].
    pub series: Vec<BalancePoint>,
}

impl SimulationOutcome {
    /// Returns the balance at the end of the last day.
    pub fn balance(&self) -> Decimal {
        self.state.balance
    }
}

/// Simulates a category's balance over `[from, to]`.
///
/// For each day, in order:
/// 1. ledger entries dated that day (on the first day, also earlier entries
///    not yet applied), in ledger order
/// 2. scheduled events dated that day, annual grant before periodic accrual
/// 3. the balance is clamped to `max_balance` after every addition and again
///    at the end of the day
///
/// There is no floor: usage can drive the balance negative.
///
/// # Errors
///
/// - `CategoryMismatch` if the ledger belongs to another category
/// - `InvalidRange` if `from` is after `to`
/// - `MissingConfig` if the category cannot be scheduled
pub fn simulate(
    category: &PtoCategory,
    ledger: &Ledger,
    state: BalanceState,
    from: NaiveDate,
    to: NaiveDate,
    mode: SeriesMode,
) -> EngineResult<SimulationOutcome> {
    if ledger.category_id() != category.id {
        return Err(EngineError::CategoryMismatch {
            expected: category.id.clone(),
            found: ledger.category_id().to_string(),
        });
    }

    let config = &category.config;
    let planned = schedule(config, from, to, state.yearly)?;
    let entries = ledger.entries();
    let mut events = planned.events.iter().peekable();

    let mut balance = state.balance;
    let mut applied = state.entries_applied;
    let mut series = match mode {
        SeriesMode::Daily => Vec::with_capacity(((to - from).num_days() + 1) as usize),
        SeriesMode::FinalOnly => Vec::new(),
    };

    for day in from.iter_days().take_while(|day| *day <= to) {
        while let Some(entry) = entries.get(applied).filter(|entry| entry.date <= day) {
            balance = config.clamp(balance + entry.amount);
            applied += 1;
        }

        while let Some(event) = events.next_if(|event| event.date == day) {
            balance = config.clamp(balance + event.amount);
        }

        balance = config.clamp(balance);

        if mode == SeriesMode::Daily {
            series.push(BalancePoint { date: day, balance });
        }
    }

    debug!(
        category_id = %category.id,
        %from,
        %to,
        events = planned.events.len(),
        entries = applied - state.entries_applied,
        %balance,
        "Simulated balance"
    );

    Ok(SimulationOutcome {
        state: BalanceState {
            balance,
            yearly: planned.yearly,
            entries_applied: applied,
        },
        series,
    })
}

/// Computes the state of a category at the end of `today`.
///
/// Before the start date (or without one) only the starting balance and the
/// ledger entries dated on or before `today` count.
pub fn current_state(
    category: &PtoCategory,
    ledger: &Ledger,
    today: NaiveDate,
) -> EngineResult<BalanceState> {
    let config = &category.config;
    config.validate()?;
    let opening = BalanceState::opening(config);

    match config.start_date.filter(|start| *start <= today) {
        Some(start) => {
            simulate(category, ledger, opening, start, today, SeriesMode::FinalOnly)
                .map(|outcome| outcome.state)
        }
        None => {
            if ledger.category_id() != category.id {
                return Err(EngineError::CategoryMismatch {
                    expected: category.id.clone(),
                    found: ledger.category_id().to_string(),
                });
            }
            let entries = ledger.entries_through(today);
            let balance = entries
                .iter()
                .fold(config.clamp(opening.balance), |balance, entry| {
                    config.clamp(balance + entry.amount)
                });
            Ok(BalanceState {
                balance,
                entries_applied: entries.len(),
                ..opening
            })
        }
    }
}

/// Computes the balance of a category at the end of `today`.
///
/// # Example
///
/// ```
/// use pto_engine::calculation::{Ledger, current_balance};
/// use pto_engine::models::{AccrualFrequency, CategoryConfig, PtoCategory};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let category = PtoCategory::new("vacation", CategoryConfig {
///     accrual_rate: Decimal::new(2, 0),
///     accrual_frequency: Some(AccrualFrequency::Weekly),
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     starting_balance: Decimal::new(10, 0),
///     ..CategoryConfig::new("Vacation")
/// });
/// let ledger = Ledger::new("vacation");
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
/// assert_eq!(current_balance(&category, &ledger, today).unwrap(), Decimal::new(16, 0));
/// ```
pub fn current_balance(
    category: &PtoCategory,
    ledger: &Ledger,
    today: NaiveDate,
) -> EngineResult<Decimal> {
    current_state(category, ledger, today).map(|state| state.balance)
}

/// Projects a category's balance from `today` through `target`.
///
/// The series starts with today's balance and has one point per day.
/// Ledger entries dated after `today` are applied on their dates.
///
/// # Errors
///
/// `InvalidRange` if `target` is before `today`.
pub fn forecast(
    category: &PtoCategory,
    ledger: &Ledger,
    today: NaiveDate,
    target: NaiveDate,
) -> EngineResult<Vec<BalancePoint>> {
    check_forecast_range(category, today, target)?;
    let state = current_state(category, ledger, today)?;
    project(category, ledger, state, today, target)
}

/// Projects a category's balance at `target` without building a series.
pub fn forecast_balance(
    category: &PtoCategory,
    ledger: &Ledger,
    today: NaiveDate,
    target: NaiveDate,
) -> EngineResult<Decimal> {
    check_forecast_range(category, today, target)?;
    let state = current_state(category, ledger, today)?;

    match today.succ_opt().filter(|next| *next <= target) {
        Some(next) => simulate(category, ledger, state, next, target, SeriesMode::FinalOnly)
            .map(|outcome| outcome.balance()),
        None => Ok(state.balance),
    }
}

/// Builds the balance report for a category: current balance, year-to-date
/// periodic accrual and the projection through `horizon`.
pub fn balance_report(
    category: &PtoCategory,
    ledger: &Ledger,
    today: NaiveDate,
    horizon: NaiveDate,
) -> EngineResult<BalanceReport> {
    check_forecast_range(category, today, horizon)?;
    let state = current_state(category, ledger, today)?;
    let projected_balance = project(category, ledger, state, today, horizon)?;

    Ok(BalanceReport {
        category_id: category.id.clone(),
        as_of: today,
        current_balance: state.balance,
        accrued_ytd: state.yearly.accrued_in(today.year()),
        projected_balance,
    })
}

/// Daily series starting with `state` on `today`, continued through `target`.
fn project(
    category: &PtoCategory,
    ledger: &Ledger,
    state: BalanceState,
    today: NaiveDate,
    target: NaiveDate,
) -> EngineResult<Vec<BalancePoint>> {
    let mut series = vec![BalancePoint {
        date: today,
        balance: state.balance,
    }];
    if let Some(next) = today.succ_opt().filter(|next| *next <= target) {
        let outcome = simulate(category, ledger, state, next, target, SeriesMode::Daily)?;
        series.extend(outcome.series);
    }
    Ok(series)
}

fn check_forecast_range(
    category: &PtoCategory,
    today: NaiveDate,
    target: NaiveDate,
) -> EngineResult<()> {
    if target < today {
        warn!(
            category_id = %category.id,
            %today,
            %target,
            "Forecast target is in the past"
        );
        return Err(EngineError::InvalidRange {
            from: today,
            to: target,
        });
    }
    Ok(())
}
