//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{ReportError, ReportResult};

use super::types::{
    A3NormSource, CalculationSettings, CatalogSeed, EngineConfig, ServerSettings,
    StorageSettings,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml   # Calculation policy (shift hours, A3 norm source)
/// ├── storage.yaml  # Database location
/// ├── server.yaml   # HTTP bind address
/// └── catalog.yaml  # Optional reference data seed
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_report::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Shift hours: {}", loader.calculation().reference_shift_hours);
/// # Ok::<(), shift_report::error::ReportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing or contains invalid
    /// YAML, or if the calculation policy is unusable (a non-positive shift
    /// length or A3 factor).
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let calculation = Self::load_yaml::<CalculationSettings>(&engine_path)?;
        Self::check_calculation(&engine_path, &calculation)?;

        let storage = Self::load_yaml::<StorageSettings>(&path.join("storage.yaml"))?;
        let server = Self::load_yaml::<ServerSettings>(&path.join("server.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(calculation, storage, server),
        })
    }

    /// Loads a reference data seed file.
    ///
    /// Products with neither norm are dropped, since they cannot be produced
    /// on any line.
    pub fn load_catalog_seed<P: AsRef<Path>>(path: P) -> ReportResult<CatalogSeed> {
        let mut seed = Self::load_yaml::<CatalogSeed>(path.as_ref())?;
        seed.products
            .retain(|p| p.norm_a3.is_some() || p.norm_a4.is_some());
        Ok(seed)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ReportResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_calculation(path: &Path, settings: &CalculationSettings) -> ReportResult<()> {
        let invalid = |message: &str| ReportError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if settings.reference_shift_hours <= Decimal::ZERO {
            return Err(invalid("reference_shift_hours must be positive"));
        }
        if let A3NormSource::Scaled { factor } = settings.a3_norm_source {
            if factor <= Decimal::ZERO {
                return Err(invalid("a3_norm_source factor must be positive"));
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the calculation settings.
    pub fn calculation(&self) -> &CalculationSettings {
        self.config.calculation()
    }

    /// Returns the storage settings.
    pub fn storage(&self) -> &StorageSettings {
        self.config.storage()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        self.config.server()
    }
}
