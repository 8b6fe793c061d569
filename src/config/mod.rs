//! Configuration loading for preset generation.
//!
//! This module loads the UPT, Flex and tenure-based standard PTO parameters
//! from `presets.yaml`. A built-in default is available without any files.
//!
//! # Example
//!
//! ```no_run
//! use pto_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Flex rate: {}", config.presets().flex.accrual_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{FlexPreset, PresetConfig, StandardPreset, TenureBracket, UptPreset};
