//! Warning records produced by the checks.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Severity of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningLevel {
    /// Improvement suggestion.
    Info,
    /// Advisory mismatch that should be reviewed.
    Warning,
    /// Data-quality violation.
    Error,
}

impl WarningLevel {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            WarningLevel::Info => "INFO",
            WarningLevel::Warning => "WARNING",
            WarningLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of directory entity a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Biobank,
    Collection,
    Contact,
    Network,
}

impl EntityType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Biobank => "BIOBANK",
            EntityType::Collection => "COLLECTION",
            EntityType::Contact => "CONTACT",
            EntityType::Network => "NETWORK",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finding about one directory entity.
///
/// Warnings are never modified or merged once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Name of the check that produced this warning.
    pub check_name: String,
    /// National node the entity belongs to.
    pub location: String,
    /// Severity.
    pub level: WarningLevel,
    /// Id of the affected entity.
    pub entity_id: String,
    /// Kind of the affected entity.
    pub entity_type: EntityType,
    /// Human-readable description.
    pub message: String,
}

impl Warning {
    /// Create a new warning.
    pub fn new(
        check_name: impl Into<String>,
        location: impl Into<String>,
        level: WarningLevel,
        entity_id: impl Into<String>,
        entity_type: EntityType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            location: location.into(),
            level,
            entity_id: entity_id.into(),
            entity_type,
            message: message.into(),
        }
    }

    /// Stable digest of all fields, for comparing runs.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for field in [
            self.check_name.as_str(),
            self.location.as_str(),
            self.level.label(),
            self.entity_id.as_str(),
            self.entity_type.label(),
            self.message.as_str(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0u8]);
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} {}: {}",
            self.level, self.location, self.entity_type, self.entity_id, self.message
        )
    }
}
