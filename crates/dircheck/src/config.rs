//! Run configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DircheckError, Result};
use crate::validation::{CheckOptions, NationalNodes};

/// National nodes registered in the directory by default.
const DEFAULT_NATIONAL_NODES: &[&str] = &[
    "AT", "BE", "BG", "CH", "CY", "CZ", "DE", "EE", "EU", "FI", "FR", "GR", "HU", "IT", "LT",
    "LV", "MT", "NL", "NO", "PL", "SE", "SI", "TR", "UK",
];

/// Configuration for a check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirCheckConfig {
    /// National node codes with their contact e-mails.
    pub national_nodes: NationalNodes,
    /// Names of checks to skip.
    pub disabled_checks: Vec<String>,
    /// ORPHA↔ICD-10 mapping table; ORPHA rules are skipped without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orpha_mapping: Option<PathBuf>,
}

impl Default for DirCheckConfig {
    fn default() -> Self {
        Self {
            national_nodes: DEFAULT_NATIONAL_NODES
                .iter()
                .map(|nn| (nn.to_string(), Vec::new()))
                .collect(),
            disabled_checks: Vec::new(),
            orpha_mapping: None,
        }
    }
}

impl DirCheckConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DircheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot be right.
    pub fn validate(&self) -> Result<()> {
        if let Some(nn) = self
            .national_nodes
            .keys()
            .find(|nn| nn.is_empty() || nn.contains('_'))
        {
            return Err(DircheckError::Config(format!(
                "invalid national node code '{}'",
                nn
            )));
        }
        Ok(())
    }

    /// Set the mapping table path.
    pub fn with_orpha_mapping(mut self, path: impl Into<PathBuf>) -> Self {
        self.orpha_mapping = Some(path.into());
        self
    }

    /// Add checks to skip.
    pub fn with_disabled_checks<S: Into<String>>(mut self, checks: impl IntoIterator<Item = S>) -> Self {
        self.disabled_checks.extend(checks.into_iter().map(Into::into));
        self
    }

    /// Options passed to every check.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions::new(self.national_nodes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_nodes() {
        let config = DirCheckConfig::default();
        assert!(config.check_options().has_national_node("CZ"));
        assert!(!config.check_options().has_national_node("US"));
        assert!(config.orpha_mapping.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DirCheckConfig =
            serde_json::from_str(r#"{"disabled_checks": ["ValidateIds"]}"#).unwrap();
        assert_eq!(config.disabled_checks, vec!["ValidateIds"]);
        assert!(config.national_nodes.contains_key("AT"));
    }

    #[test]
    fn test_explicit_nodes_keep_order() {
        let config: DirCheckConfig = serde_json::from_str(
            r#"{"national_nodes": {"SE": ["a@example.org"], "AT": []}}"#,
        )
        .unwrap();
        let keys: Vec<_> = config.national_nodes.keys().cloned().collect();
        assert_eq!(keys, vec!["SE", "AT"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_node_code() {
        let config: DirCheckConfig =
            serde_json::from_str(r#"{"national_nodes": {"C_Z": []}}"#).unwrap();
        assert!(matches!(config.validate(), Err(DircheckError::Config(_))));
    }
}
