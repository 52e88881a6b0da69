//! Main DirCheck struct and public API.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::coding::OrphaCodeTable;
use crate::config::DirCheckConfig;
use crate::directory::Directory;
use crate::error::Result;
use crate::report::CheckReport;
use crate::validation::{CheckEngine, CheckOptions};

/// Runs the configured checks over directory snapshots.
pub struct DirCheck {
    config: DirCheckConfig,
    engine: CheckEngine,
    options: CheckOptions,
}

impl DirCheck {
    /// Create an instance with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DirCheckConfig::default())
    }

    /// Create an instance with a custom configuration.
    pub fn with_config(config: DirCheckConfig) -> Self {
        let engine = CheckEngine::new().without(&config.disabled_checks);
        let options = config.check_options();
        Self {
            config,
            engine,
            options,
        }
    }

    pub fn config(&self) -> &DirCheckConfig {
        &self.config
    }

    /// Names of the checks that will run.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.engine.check_names()
    }

    /// Load a snapshot file and attach the configured ORPHA mapping table.
    pub fn load_directory(&self, path: impl AsRef<Path>) -> Result<Directory> {
        let path = path.as_ref();
        let directory = Directory::load(path)?;
        info!(
            path = %path.display(),
            biobanks = directory.biobanks().len(),
            collections = directory.collections().len(),
            "Loaded directory snapshot"
        );

        match &self.config.orpha_mapping {
            Some(mapping) => {
                let table = OrphaCodeTable::from_file(mapping)?;
                let stats = table.stats();
                info!(
                    orpha_codes = stats.orpha_codes,
                    mappings = stats.mappings,
                    "Loaded ORPHA mapping table"
                );
                Ok(directory.with_orpha_mapper(Arc::new(table)))
            }
            None => {
                warn!("No ORPHA mapping configured, ORPHA codes will not be validated");
                Ok(directory)
            }
        }
    }

    /// Load and check a snapshot file.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<CheckReport> {
        let directory = self.load_directory(path)?;
        self.run(&directory)
    }

    /// Run every enabled check over a directory.
    pub fn run(&self, directory: &Directory) -> Result<CheckReport> {
        let sink = self.engine.run(directory, &self.options)?;
        let report = CheckReport::from_sink(sink);
        info!(
            errors = report.summary.by_level.error,
            warnings = report.summary.by_level.warning,
            infos = report.summary.by_level.info,
            "Checks complete"
        );
        Ok(report)
    }
}

impl Default for DirCheck {
    fn default() -> Self {
        Self::new()
    }
}
