//! Configuration types for preset generation.
//!
//! This module contains the strongly-typed structures deserialized from
//! `presets.yaml`. [`PresetConfig::default`] carries the built-in table so
//! presets can be generated without any files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_SHIFT_ACCRUAL_MINUTES;

/// The complete preset configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Shift-linked unpaid time off.
    pub upt: UptPreset,
    /// Weekly flexible PTO with a yearly cap and a January grant.
    pub flex: FlexPreset,
    /// Tenure-based standard PTO.
    pub standard: StandardPreset,
}

impl PresetConfig {
    /// Returns the standard PTO bracket for a tenure, if any applies.
    pub fn bracket_for(&self, tenure_years: u32) -> Option<&TenureBracket> {
        self.standard.bracket_for(tenure_years)
    }
}

/// Parameters of the shift-linked UPT category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptPreset {
    /// Category name.
    pub name: String,
    /// Balance ceiling.
    pub max_balance: Decimal,
    /// Minutes earned per hour worked.
    pub minutes_per_hour: Decimal,
}

impl Default for UptPreset {
    fn default() -> Self {
        Self {
            name: "UPT".to_string(),
            max_balance: Decimal::new(80, 0),
            minutes_per_hour: DEFAULT_SHIFT_ACCRUAL_MINUTES,
        }
    }
}

/// Parameters of the flexible PTO category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexPreset {
    /// Category name.
    pub name: String,
    /// Hours earned per week.
    pub accrual_rate: Decimal,
    /// Balance ceiling.
    pub max_balance: Decimal,
    /// Maximum weekly accrual per calendar year.
    pub yearly_accrual_cap: Decimal,
    /// Hours granted every January 1st; also the default starting balance.
    pub annual_grant_amount: Decimal,
}

impl Default for FlexPreset {
    fn default() -> Self {
        Self {
            name: "Flex PTO".to_string(),
            accrual_rate: Decimal::new(185, 2),
            max_balance: Decimal::new(48, 0),
            yearly_accrual_cap: Decimal::new(38, 0),
            annual_grant_amount: Decimal::new(10, 0),
        }
    }
}

/// Parameters of the standard PTO category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardPreset {
    /// Category name.
    pub name: String,
    /// Rate table, sorted by `min_years`.
    pub brackets: Vec<TenureBracket>,
}

impl StandardPreset {
    /// Returns the highest bracket whose `min_years` does not exceed the tenure.
    pub fn bracket_for(&self, tenure_years: u32) -> Option<&TenureBracket> {
        self.brackets
            .iter()
            .filter(|bracket| bracket.min_years <= tenure_years)
            .max_by_key(|bracket| bracket.min_years)
    }
}

impl Default for StandardPreset {
    fn default() -> Self {
        let bracket = |min_years, rate, max| TenureBracket {
            min_years,
            accrual_rate: Decimal::new(rate, 2),
            max_balance: Decimal::new(max, 0),
        };

        Self {
            name: "Standard PTO".to_string(),
            brackets: vec![
                bracket(0, 77, 40),
                bracket(1, 154, 80),
                bracket(2, 170, 88),
                bracket(3, 185, 96),
                bracket(4, 200, 104),
                bracket(5, 216, 112),
                bracket(6, 231, 120),
            ],
        }
    }
}

/// A row of the tenure rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureBracket {
    /// Minimum completed years of service for this bracket.
    pub min_years: u32,
    /// Hours earned per week.
    pub accrual_rate: Decimal,
    /// Balance ceiling.
    pub max_balance: Decimal,
}
