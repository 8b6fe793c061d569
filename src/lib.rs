//! PTO Accrual & Projection Engine
//!
//! This crate computes paid-time-off balances for a category by combining
//! scheduled accruals, annual grants, ledger entries (usage, adjustments and
//! shift-derived accruals) and balance caps, and projects balances forward
//! for charting.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
