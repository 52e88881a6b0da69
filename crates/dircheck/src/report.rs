//! Check run results.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DircheckError, Result};
use crate::validation::{LevelCounts, Warning, WarningSink};

/// A warning together with its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub fingerprint: String,
    #[serde(flatten)]
    pub warning: Warning,
}

/// Aggregated counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub by_level: LevelCounts,
    /// Warnings per check, in first-seen order.
    pub by_check: IndexMap<String, usize>,
    /// Levels per national node, in first-seen order.
    pub by_national_node: IndexMap<String, LevelCounts>,
}

/// Result of one run of the checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub warnings: Vec<ReportEntry>,
}

impl CheckReport {
    /// Build a report from collected warnings.
    pub fn from_sink(sink: WarningSink) -> Self {
        let mut summary = ReportSummary::default();
        let warnings: Vec<ReportEntry> = sink
            .into_warnings()
            .into_iter()
            .map(|warning| {
                summary.total += 1;
                summary.by_level.add(warning.level);
                *summary
                    .by_check
                    .entry(warning.check_name.clone())
                    .or_default() += 1;
                summary
                    .by_national_node
                    .entry(warning.location.clone())
                    .or_default()
                    .add(warning.level);
                ReportEntry {
                    fingerprint: warning.fingerprint(),
                    warning,
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            summary,
            warnings,
        }
    }

    /// Warnings located at one national node, in emission order.
    pub fn for_national_node<'a>(&'a self, nn: &'a str) -> impl Iterator<Item = &'a Warning> + 'a {
        self.warnings
            .iter()
            .map(|entry| &entry.warning)
            .filter(move |w| w.location == nn)
    }

    /// National nodes with at least one warning, in first-seen order.
    pub fn national_nodes(&self) -> impl Iterator<Item = &str> {
        self.summary.by_national_node.keys().map(String::as_str)
    }

    /// Save as pretty-printed JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| DircheckError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| DircheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a report saved with [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DircheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let report = serde_json::from_reader(BufReader::new(file))?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{EntityType, WarningLevel};

    fn sink() -> WarningSink {
        let mut sink = WarningSink::new();
        for (check, nn, level) in [
            ("ValidateIds", "CZ", WarningLevel::Error),
            ("CollectionCoding", "AT", WarningLevel::Info),
            ("ValidateIds", "CZ", WarningLevel::Warning),
        ] {
            sink.push(Warning::new(check, nn, level, "id", EntityType::Collection, "m"));
        }
        sink
    }

    #[test]
    fn test_summary() {
        let report = CheckReport::from_sink(sink());
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.by_level.error, 1);
        assert_eq!(report.summary.by_check["ValidateIds"], 2);
        assert_eq!(report.summary.by_national_node["CZ"].total(), 2);
        let nodes: Vec<_> = report.national_nodes().collect();
        assert_eq!(nodes, vec!["CZ", "AT"]);
        assert_eq!(report.for_national_node("CZ").count(), 2);
    }

    #[test]
    fn test_entry_is_flattened() {
        let report = CheckReport::from_sink(sink());
        let json = serde_json::to_value(&report.warnings[0]).unwrap();
        assert_eq!(json["check_name"], "ValidateIds");
        assert!(json["fingerprint"].as_str().unwrap().starts_with("sha256:"));
    }
}
