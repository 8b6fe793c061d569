//! PTO category model and related types.
//!
//! This module defines the [`PtoCategory`] and [`CategoryConfig`] types that
//! describe how a paid-time-off bucket accrues and where its balance is capped.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default minutes of time off earned per hour worked for shift-linked categories.
pub const DEFAULT_SHIFT_ACCRUAL_MINUTES: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// How often a category's periodic accrual is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualFrequency {
    /// Every calendar day on or after the start date.
    Daily,
    /// Every Sunday on or after the start date.
    Weekly,
    /// Every 14 days counted from the start date.
    Biweekly,
    /// The 1st of every month after the start date.
    Monthly,
    /// Every January 1st after the start date.
    Annually,
}

impl std::fmt::Display for AccrualFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccrualFrequency::Daily => write!(f, "daily"),
            AccrualFrequency::Weekly => write!(f, "weekly"),
            AccrualFrequency::Biweekly => write!(f, "biweekly"),
            AccrualFrequency::Monthly => write!(f, "monthly"),
            AccrualFrequency::Annually => write!(f, "annually"),
        }
    }
}

/// Marks a category as earning time off from worked shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAccrual {
    /// Minutes earned per hour worked.
    #[serde(default = "default_minutes_per_hour")]
    pub minutes_per_hour: Decimal,
}

fn default_minutes_per_hour() -> Decimal {
    DEFAULT_SHIFT_ACCRUAL_MINUTES
}

impl Default for ShiftAccrual {
    fn default() -> Self {
        Self {
            minutes_per_hour: DEFAULT_SHIFT_ACCRUAL_MINUTES,
        }
    }
}

/// The accrual rules and caps of a PTO category.
///
/// All amounts are in fractional hours.
///
/// # Example
///
/// ```
/// use pto_engine::models::{AccrualFrequency, CategoryConfig};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = CategoryConfig {
///     accrual_rate: Decimal::new(185, 2),
///     accrual_frequency: Some(AccrualFrequency::Weekly),
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     max_balance: Some(Decimal::new(48, 0)),
///     ..CategoryConfig::new("Flex PTO")
/// };
///
/// assert!(config.has_periodic_accrual());
/// assert_eq!(config.clamp(Decimal::new(50, 0)), Decimal::new(48, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Display name (e.g. "Vacation").
    pub name: String,
    /// Hours earned per accrual period.
    #[serde(default)]
    pub accrual_rate: Decimal,
    /// Accrual period; `None` means the category has no periodic accrual.
    #[serde(default)]
    pub accrual_frequency: Option<AccrualFrequency>,
    /// The date accrual starts.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Balance on the start date.
    #[serde(default)]
    pub starting_balance: Decimal,
    /// Absolute ceiling on the balance.
    #[serde(default)]
    pub max_balance: Option<Decimal>,
    /// Maximum periodic accrual per calendar year.
    #[serde(default)]
    pub yearly_accrual_cap: Option<Decimal>,
    /// Hours granted every January 1st, outside the yearly cap.
    #[serde(default)]
    pub annual_grant_amount: Option<Decimal>,
    /// Periodic hours already accrued in the start date's year.
    #[serde(default)]
    pub accrued_ytd: Decimal,
    /// Skip weekly accrual in the first week of a year that paid a grant.
    #[serde(default)]
    pub skip_grant_week: bool,
    /// Shift-linked accrual policy, if this category earns from shifts.
    #[serde(default)]
    pub shift_accrual: Option<ShiftAccrual>,
}

impl CategoryConfig {
    /// Creates a category with the given name and no accrual rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accrual_rate: Decimal::ZERO,
            accrual_frequency: None,
            start_date: None,
            starting_balance: Decimal::ZERO,
            max_balance: None,
            yearly_accrual_cap: None,
            annual_grant_amount: None,
            accrued_ytd: Decimal::ZERO,
            skip_grant_week: false,
            shift_accrual: None,
        }
    }

    /// Returns true if the category pays a non-zero periodic accrual.
    pub fn has_periodic_accrual(&self) -> bool {
        self.accrual_frequency.is_some() && !self.accrual_rate.is_zero()
    }

    /// Returns the annual grant amount if one is configured and positive.
    pub fn annual_grant(&self) -> Option<Decimal> {
        self.annual_grant_amount.filter(|amount| *amount > Decimal::ZERO)
    }

    /// Checks that every field required by the accrual rules is present.
    ///
    /// A frequency or an annual grant cannot be scheduled without a start
    /// date; no default is substituted.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date.is_none()
            && (self.accrual_frequency.is_some() || self.annual_grant().is_some())
        {
            return Err(EngineError::MissingConfig {
                category: self.name.clone(),
                field: "start_date".to_string(),
            });
        }
        Ok(())
    }

    /// Clamps a balance to `max_balance`, if set.
    pub fn clamp(&self, balance: Decimal) -> Decimal {
        match self.max_balance {
            Some(max) if balance > max => max,
            _ => balance,
        }
    }
}

/// A PTO category with its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtoCategory {
    /// Unique identifier for the category.
    pub id: String,
    /// The category's accrual rules.
    #[serde(flatten)]
    pub config: CategoryConfig,
}

impl PtoCategory {
    /// Creates a category from an identifier and its configuration.
    pub fn new(id: impl Into<String>, config: CategoryConfig) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    /// Returns the category's display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }
}
