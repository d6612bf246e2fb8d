//! Store configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! {
//!   "database": "shop",
//!   "auto_create_collections": true,
//!   "default_throughput": 400,
//!   "throughput_overrides": { "orders": 1000 }
//! }
//! ```
//!
//! Only `database` is required.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Lowest provisioned throughput a collection accepts
pub const MIN_THROUGHPUT: u32 = 400;
/// Throughput must be a multiple of this step
pub const THROUGHPUT_STEP: u32 = 100;

/// Configuration handed to the store collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database holding the collections (required)
    pub database: String,

    /// Create missing collections on first use (default: true)
    #[serde(default = "default_true")]
    pub auto_create_collections: bool,

    /// Throughput for new collections (default: 400)
    #[serde(default = "default_throughput")]
    pub default_throughput: u32,

    /// Per-table throughput
    #[serde(default)]
    pub throughput_overrides: HashMap<String, u32>,
}

fn default_true() -> bool {
    true
}

fn default_throughput() -> u32 {
    MIN_THROUGHPUT
}

impl StoreConfig {
    /// Config with defaults for the given database
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            auto_create_collections: default_true(),
            default_throughput: default_throughput(),
            throughput_overrides: HashMap::new(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> StoreResult<Self> {
        let config: StoreConfig = serde_json::from_str(content)
            .map_err(|e| StoreError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> StoreResult<()> {
        if self.database.trim().is_empty() {
            return Err(StoreError::Config("database must not be empty".into()));
        }

        check_throughput("default_throughput", self.default_throughput)?;

        for (table, throughput) in &self.throughput_overrides {
            check_throughput(&format!("throughput_overrides.{}", table), *throughput)?;
        }

        Ok(())
    }

    /// Throughput to provision for a table
    pub fn throughput_for(&self, table: &str) -> u32 {
        self.throughput_overrides
            .get(table)
            .copied()
            .unwrap_or(self.default_throughput)
    }

    pub fn with_auto_create(mut self, enabled: bool) -> Self {
        self.auto_create_collections = enabled;
        self
    }

    pub fn with_throughput(mut self, table: impl Into<String>, throughput: u32) -> Self {
        self.throughput_overrides.insert(table.into(), throughput);
        self
    }
}

fn check_throughput(name: &str, value: u32) -> StoreResult<()> {
    if value < MIN_THROUGHPUT {
        return Err(StoreError::Config(format!(
            "{} must be >= {}, got {}",
            name, MIN_THROUGHPUT, value
        )));
    }
    if value % THROUGHPUT_STEP != 0 {
        return Err(StoreError::Config(format!(
            "{} must be a multiple of {}, got {}",
            name, THROUGHPUT_STEP, value
        )));
    }
    Ok(())
}
