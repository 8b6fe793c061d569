//! Onboarding presets.
//!
//! Maps a few onboarding answers (tenure, shift pattern, current balances)
//! to a starter set of categories: shift-linked UPT, weekly Flex PTO with a
//! yearly cap and January grant, and tenure-based standard PTO.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PresetConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualFrequency, CategoryConfig, ShiftAccrual};

use super::shift_accrual::shift_accrual_amount;

/// Onboarding answers used to build the starter categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetParams {
    /// Completed years of service.
    pub tenure_years: u32,
    /// Typical shift length in hours.
    pub shift_length_hours: Decimal,
    /// Typical number of shifts per week.
    pub shifts_per_week: u32,
    /// Current UPT balance, if known.
    #[serde(default)]
    pub current_upt: Option<Decimal>,
    /// Current Flex PTO balance, if known.
    #[serde(default)]
    pub current_flex: Option<Decimal>,
    /// Flex hours already accrued this year, if known.
    #[serde(default)]
    pub current_flex_ytd: Option<Decimal>,
    /// Current standard PTO balance, if known.
    #[serde(default)]
    pub current_std: Option<Decimal>,
    /// The date the categories start accruing.
    pub start_date: NaiveDate,
}

impl PresetParams {
    /// Creates parameters with no known balances.
    pub fn new(
        tenure_years: u32,
        shift_length_hours: Decimal,
        shifts_per_week: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            tenure_years,
            shift_length_hours,
            shifts_per_week,
            current_upt: None,
            current_flex: None,
            current_flex_ytd: None,
            current_std: None,
            start_date,
        }
    }
}

/// Builds the starter categories, in the order UPT, Flex PTO, standard PTO.
///
/// # Errors
///
/// `MissingConfig` if no tenure bracket applies to `tenure_years`.
///
/// # Example
///
/// ```
/// use pto_engine::calculation::{PresetParams, preset};
/// use pto_engine::config::PresetConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let params = PresetParams::new(0, Decimal::new(10, 0), 4, start);
/// let categories = preset(&params, &PresetConfig::default()).unwrap();
///
/// assert_eq!(categories.len(), 3);
/// assert_eq!(categories[1].accrual_rate, Decimal::new(185, 2));
/// ```
pub fn preset(params: &PresetParams, config: &PresetConfig) -> EngineResult<Vec<CategoryConfig>> {
    let upt = &config.upt;
    let flex = &config.flex;
    let standard = &config.standard;

    let bracket = standard
        .bracket_for(params.tenure_years)
        .ok_or_else(|| EngineError::MissingConfig {
            category: standard.name.clone(),
            field: format!("brackets (tenure {})", params.tenure_years),
        })?;

    let upt_category = CategoryConfig {
        start_date: Some(params.start_date),
        starting_balance: params.current_upt.unwrap_or(Decimal::ZERO),
        max_balance: Some(upt.max_balance),
        shift_accrual: Some(ShiftAccrual {
            minutes_per_hour: upt.minutes_per_hour,
        }),
        ..CategoryConfig::new(upt.name.clone())
    };

    let flex_category = CategoryConfig {
        accrual_rate: flex.accrual_rate,
        accrual_frequency: Some(AccrualFrequency::Weekly),
        start_date: Some(params.start_date),
        starting_balance: params.current_flex.unwrap_or(flex.annual_grant_amount),
        max_balance: Some(flex.max_balance),
        yearly_accrual_cap: Some(flex.yearly_accrual_cap),
        annual_grant_amount: Some(flex.annual_grant_amount),
        accrued_ytd: params
            .current_flex_ytd
            .unwrap_or_else(|| estimated_flex_ytd(params.start_date, config)),
        skip_grant_week: true,
        ..CategoryConfig::new(flex.name.clone())
    };

    let standard_category = CategoryConfig {
        accrual_rate: bracket.accrual_rate,
        accrual_frequency: Some(AccrualFrequency::Weekly),
        start_date: Some(params.start_date),
        starting_balance: params.current_std.unwrap_or(Decimal::ZERO),
        max_balance: Some(bracket.max_balance),
        ..CategoryConfig::new(standard.name.clone())
    };

    info!(
        tenure_years = params.tenure_years,
        start_date = %params.start_date,
        standard_rate = %bracket.accrual_rate,
        flex_accrued_ytd = %flex_category.accrued_ytd,
        "Generated preset categories"
    );

    Ok(vec![upt_category, flex_category, standard_category])
}

/// Estimates the UPT hours earned per week from the shift pattern.
///
/// # Example
///
/// ```
/// use pto_engine::calculation::{PresetParams, estimated_weekly_upt};
/// use pto_engine::config::PresetConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let params = PresetParams::new(0, Decimal::new(12, 0), 3, start);
///
/// // 36 hours at 5 minutes per hour
/// assert_eq!(estimated_weekly_upt(&params, &PresetConfig::default()), Decimal::new(3, 0));
/// ```
pub fn estimated_weekly_upt(params: &PresetParams, config: &PresetConfig) -> Decimal {
    let weekly_hours = params.shift_length_hours * Decimal::from(params.shifts_per_week);
    shift_accrual_amount(weekly_hours, config.upt.minutes_per_hour)
}

/// Flex hours accrued before `start_date` in its year: whole weeks since
/// January 1st at the weekly rate, up to the yearly cap.
fn estimated_flex_ytd(start_date: NaiveDate, config: &PresetConfig) -> Decimal {
    let year_start = start_date.with_ordinal(1).unwrap_or(start_date);
    let weeks = (start_date - year_start).num_days() / 7;
    let estimate = Decimal::from(weeks) * config.flex.accrual_rate;
    estimate.min(config.flex.yearly_accrual_cap)
}
