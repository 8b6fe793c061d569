//! Calculation logic for the PTO engine.
//!
//! This module contains the ledger merge, shift-linked accrual, the accrual
//! scheduler with its yearly cap accumulator, the day-by-day balance
//! simulator behind current balances and forecasts, and onboarding presets.

mod ledger;
mod preset;
mod scheduler;
mod shift_accrual;
mod simulator;

pub use ledger::Ledger;
pub use preset::{PresetParams, estimated_weekly_upt, preset};
pub use scheduler::{EventKind, Schedule, ScheduledEvent, YearlyAccrual, schedule};
pub use shift_accrual::{shift_accrual_amount, shift_entry};
pub use simulator::{
    BalanceState, SeriesMode, SimulationOutcome, balance_report, current_balance, current_state,
    forecast, forecast_balance, simulate,
};
