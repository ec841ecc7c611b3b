//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate
//! policy and seeded agency markups from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::Agency;

use super::types::{AgenciesConfig, RatePolicy};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/warehouse/
/// ├── policy.yaml     # Base rates, static markups, thresholds (required)
/// └── agencies.yaml   # Dated agency markup history (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use warehouse_labor::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/warehouse").unwrap();
/// println!("Default base rate: ${}", loader.policy().base_rates.default);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: RatePolicy,
    agencies: Vec<Agency>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing or if any present file
    /// contains invalid YAML. A missing `agencies.yaml` yields no agencies.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<RatePolicy>(&path.join("policy.yaml"))?;

        let agencies_path = path.join("agencies.yaml");
        let agencies = if agencies_path.exists() {
            Self::load_yaml::<AgenciesConfig>(&agencies_path)?
                .agencies
                .into_iter()
                .map(Agency::from)
                .collect()
        } else {
            Vec::new()
        };

        info!(
            path = %path.display(),
            agencies = agencies.len(),
            "Loaded rate policy"
        );

        Ok(Self { policy, agencies })
    }

    /// Builds a loader from already-constructed parts.
    pub fn from_parts(policy: RatePolicy, agencies: Vec<Agency>) -> Self {
        Self { policy, agencies }
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

    /// Returns the rate policy.
    pub fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    /// Returns the seeded agencies.
    pub fn agencies(&self) -> &[Agency] {
        &self.agencies
    }

    /// Consumes the loader, returning the policy and seeded agencies.
    pub fn into_parts(self) -> (RatePolicy, Vec<Agency>) {
        (self.policy, self.agencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/warehouse"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy().base_rates.default, dec("16.00"));
        assert_eq!(
            loader.policy().base_rate_for(Some("forklift driver")),
            dec("18.00")
        );
        assert_eq!(loader.policy().weekly_overtime_threshold, dec("40"));
    }

    #[test]
    fn test_static_markups_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.policy().static_markup("JJ Staffing"), Some(dec("0.25")));
        assert_eq!(loader.policy().static_markup("Stride"), Some(dec("0.30")));
        assert_eq!(loader.policy().static_markup("Unknown Co"), None);
    }

    #[test]
    fn test_agency_markup_history_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let jj = loader
            .agencies()
            .iter()
            .find(|a| a.name == "JJ Staffing")
            .expect("JJ Staffing should be seeded");

        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(jj.markup_on(date), Some(dec("0.25")));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_into_parts_returns_policy_and_agencies() {
        let loader = ConfigLoader::from_parts(RatePolicy::default(), vec![Agency::new("JJ")]);
        let (policy, agencies) = loader.into_parts();
        assert_eq!(policy.base_rates.default, dec("16.00"));
        assert_eq!(agencies.len(), 1);
    }
}
