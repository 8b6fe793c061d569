//! Core data models for the PTO engine.
//!
//! This module contains the domain models used throughout the engine.

mod balance;
mod category;
mod duration;
mod ledger_entry;
mod shift;

pub use balance::{BalancePoint, BalanceReport};
pub use category::{
    AccrualFrequency, CategoryConfig, DEFAULT_SHIFT_ACCRUAL_MINUTES, PtoCategory, ShiftAccrual,
};
pub use duration::{Hours, format_hours, parse_duration};
pub use ledger_entry::{EntrySource, LedgerEntry};
pub use shift::{Break, WorkShift};
