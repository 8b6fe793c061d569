//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading preset
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::PresetConfig;

/// Loads and provides access to preset configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── presets.yaml   # UPT, Flex and standard PTO tenure table
/// ```
///
/// # Example
///
/// ```no_run
/// use pto_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Standard brackets: {}", loader.presets().standard.brackets.len());
/// # Ok::<(), pto_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    presets: PresetConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `presets.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML or missing fields (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let presets_path = path.as_ref().join("presets.yaml");
        let mut presets = Self::load_yaml::<PresetConfig>(&presets_path)?;
        presets.standard.brackets.sort_by_key(|bracket| bracket.min_years);

        info!(
            path = %presets_path.display(),
            brackets = presets.standard.brackets.len(),
            "Loaded preset configuration"
        );

        Ok(Self { presets })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded preset configuration.
    pub fn presets(&self) -> &PresetConfig {
        &self.presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.presets().flex.name, "Flex PTO");
        assert_eq!(loader.presets().flex.accrual_rate, dec("1.85"));
        assert_eq!(loader.presets().upt.max_balance, dec("80"));
    }

    #[test]
    fn test_file_matches_built_in_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.presets(), &PresetConfig::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("presets.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_loader_uses_built_in_table() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.presets().bracket_for(3).unwrap().accrual_rate, dec("1.85"));
    }
}
