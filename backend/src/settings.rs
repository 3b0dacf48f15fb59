//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `FOOTPRINT_*` environment variables or a configuration
//! file discovered by OrthoConfig; anything unset falls back to the defaults
//! below.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ortho_config::{OrthoConfig, OrthoResult};
use serde::Deserialize;

use crate::domain::emissions::DEFAULT_REGION;
use crate::outbound::persistence::StorageConfig;

/// SQLite file used when no path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "carbon_calculator.db";

/// Settings shared by every `footprint` command.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOOTPRINT")]
pub struct FootprintSettings {
    /// SQLite database file; `:memory:` keeps data for one run only.
    #[ortho_config(default = PathBuf::from(DEFAULT_DATABASE_PATH))]
    pub database_path: PathBuf,
    /// Region whose emission factors are applied to submissions.
    #[ortho_config(default = DEFAULT_REGION.to_owned())]
    pub region: String,
}

impl FootprintSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// Command-line arguments belong to the `footprint` subcommands, so only
    /// the program name is handed to OrthoConfig.
    ///
    /// # Errors
    ///
    /// Returns the OrthoConfig error when a configured value cannot be parsed.
    pub fn load_without_cli_args() -> OrthoResult<Self> {
        Self::load_from_iter([OsString::from("footprint")])
    }

    /// Return the configured database path.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Return the configured region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Storage configuration for the configured database path.
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::new(self.database_path.to_string_lossy())
    }
}
