//! Runs the registered checks against a directory.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::directory::Directory;
use crate::error::Result;

use super::checks::{all_checks, Check, CheckOptions};
use super::sink::WarningSink;

/// Ordered set of checks to run.
pub struct CheckEngine {
    checks: Vec<Box<dyn Check>>,
}

impl CheckEngine {
    /// Create an engine with every registered check.
    pub fn new() -> Self {
        Self {
            checks: all_checks(),
        }
    }

    /// Create an engine with an explicit list of checks.
    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// Drop checks by name. Unknown names are ignored.
    pub fn without<S: AsRef<str>>(mut self, disabled: &[S]) -> Self {
        let disabled: HashSet<&str> = disabled.iter().map(|s| s.as_ref()).collect();
        self.checks.retain(|check| {
            let keep = !disabled.contains(check.name());
            if !keep {
                debug!(check = check.name(), "Check disabled");
            }
            keep
        });
        self
    }

    /// Names of the checks that will run, in order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check and collect their warnings in check order.
    pub fn run(&self, directory: &Directory, options: &CheckOptions) -> Result<WarningSink> {
        let mut sink = WarningSink::new();
        for check in &self.checks {
            let warnings = check.evaluate(directory, options)?;
            info!(check = check.name(), warnings = warnings.len(), "Check finished");
            sink.extend(warnings);
        }
        Ok(sink)
    }
}

impl Default for CheckEngine {
    fn default() -> Self {
        Self::new()
    }
}
