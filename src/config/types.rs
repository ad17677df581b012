//! Configuration types for the shift report engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_REFERENCE_SHIFT_HOURS;
use crate::models::{CatalogEntry, Employee, Site};

/// Where the base norm for line A3 comes from.
///
/// Line A4 always uses the catalog's A4 norm directly.
///
/// # Example
///
/// ```
/// use shift_report::config::A3NormSource;
///
/// let source: A3NormSource = serde_yaml::from_str("kind: scaled\nfactor: 0.7").unwrap();
/// assert!(matches!(source, A3NormSource::Scaled { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum A3NormSource {
    /// Use the catalog's A3 norm as stored.
    #[default]
    Dedicated,
    /// Use `round(norm_a3 * factor)`.
    Scaled {
        /// Multiplier applied to the catalog's A3 norm.
        factor: Decimal,
    },
}

fn default_reference_shift_hours() -> Decimal {
    DEFAULT_REFERENCE_SHIFT_HOURS
}

/// Calculation policy values from `engine.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationSettings {
    /// Shift length that converts an hour-weighted norm into units.
    #[serde(default = "default_reference_shift_hours")]
    pub reference_shift_hours: Decimal,
    /// Source of truth for the A3 base norm.
    #[serde(default)]
    pub a3_norm_source: A3NormSource,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            reference_shift_hours: DEFAULT_REFERENCE_SHIFT_HOURS,
            a3_norm_source: A3NormSource::Dedicated,
        }
    }
}

/// Storage settings from `storage.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// Path of the SQLite database file.
    pub database_path: String,
}

/// HTTP server settings from `server.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_address: String,
}

/// Reference data loaded from `catalog.yaml` to seed an empty store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogSeed {
    /// Production sites.
    #[serde(default)]
    pub sites: Vec<Site>,
    /// Product catalog entries.
    #[serde(default)]
    pub products: Vec<CatalogEntry>,
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    calculation: CalculationSettings,
    storage: StorageSettings,
    server: ServerSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        calculation: CalculationSettings,
        storage: StorageSettings,
        server: ServerSettings,
    ) -> Self {
        Self {
            calculation,
            storage,
            server,
        }
    }

    /// Returns the calculation settings.
    pub fn calculation(&self) -> &CalculationSettings {
        &self.calculation
    }

    /// Returns the storage settings.
    pub fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.server
    }
}
