//! Configuration loading and management for the shift report engine.
//!
//! This module loads the calculation policy, storage and server settings
//! from YAML files, plus an optional reference data seed.
//!
//! # Example
//!
//! ```no_run
//! use shift_report::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Database: {}", config.storage().database_path);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    A3NormSource, CalculationSettings, CatalogSeed, EngineConfig, ServerSettings,
    StorageSettings,
};
