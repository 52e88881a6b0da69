//! ORPHA (Orphanet rare disease) code lookups and ORPHA↔ICD-10 translation.
//!
//! The checks consume mappings through the [`OrphaMapper`] trait. The crate
//! ships one implementation, [`OrphaCodeTable`], which loads a delimited
//! mapping file into memory.
//!
//! # Example
//!
//! ```
//! use dircheck::coding::{MappingType, OrphaCodeTable, OrphaMapper};
//!
//! let mut table = OrphaCodeTable::new();
//! table.add_mapping("558", "Marfan syndrome", Some(("Q87.4", MappingType::Exact)));
//!
//! assert!(table.is_valid_orpha_code("ORPHA:558"));
//! assert_eq!(table.orpha_to_icd10("558")[0].code, "Q87.4");
//! assert_eq!(table.icd10_to_orpha("Q87.4")[0].code, "558");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coding::diagnosis::{ICD10_PREFIX, ORPHA_PREFIX};
use crate::error::{DircheckError, Result};

/// Precision of an ORPHA↔ICD-10 translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingType {
    /// Both codes denote the same concept.
    Exact,
    /// The ORPHA concept is narrower than the ICD-10 code.
    Narrower,
    /// The ORPHA concept is broader than the ICD-10 code.
    Broader,
    /// The codes overlap without a strict hierarchy.
    Approximate,
    /// The mapping has not been qualified yet.
    NotDecided,
}

impl MappingType {
    /// Wire label used in messages and reports.
    pub fn label(&self) -> &'static str {
        match self {
            MappingType::Exact => "EXACT",
            MappingType::Narrower => "NARROWER",
            MappingType::Broader => "BROADER",
            MappingType::Approximate => "APPROXIMATE",
            MappingType::NotDecided => "NOT_DECIDED",
        }
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MappingType {
    type Err = DircheckError;

    /// Accepts both the long labels and Orphanet's short relation codes.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "E" | "EXACT" => Ok(MappingType::Exact),
            "NTBT" | "NARROWER" => Ok(MappingType::Narrower),
            "BTNT" | "BROADER" => Ok(MappingType::Broader),
            "A" | "APPROXIMATE" => Ok(MappingType::Approximate),
            "ND" | "NOT_DECIDED" => Ok(MappingType::NotDecided),
            other => Err(DircheckError::Mapping(format!(
                "unknown mapping type '{}'",
                other
            ))),
        }
    }
}

/// One translation result: the target code and how precise it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Target code, without any prefix.
    pub code: String,
    /// Precision of the translation.
    pub mapping_type: MappingType,
}

impl MappingEntry {
    /// Create a new mapping entry.
    pub fn new(code: impl Into<String>, mapping_type: MappingType) -> Self {
        Self {
            code: code.into(),
            mapping_type,
        }
    }
}

/// Read-only authority for ORPHA codes.
///
/// Implementations must be safe to share between threads; the checks only
/// ever read from them.
pub trait OrphaMapper: Send + Sync {
    /// Whether a raw diagnosis entry such as `ORPHA:558` names a known code.
    fn is_valid_orpha_code(&self, entry: &str) -> bool;

    /// ORPHA codes corresponding to an ICD-10 code (without URN prefix).
    fn icd10_to_orpha(&self, icd10_code: &str) -> Vec<MappingEntry>;

    /// ICD-10 codes corresponding to an ORPHA code (without `ORPHA:` prefix).
    fn orpha_to_icd10(&self, orpha_code: &str) -> Vec<MappingEntry>;

    /// Human-readable name(s) of an ORPHA code, empty when unknown.
    fn orpha_to_names_string(&self, orpha_code: &str) -> String;
}

/// Statistics about a loaded mapping table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrphaTableStats {
    /// Distinct ORPHA codes.
    pub orpha_codes: usize,
    /// Distinct ICD-10 codes with at least one translation.
    pub icd10_codes: usize,
    /// Total translation pairs.
    pub mappings: usize,
    /// Rows skipped while loading.
    pub skipped_rows: usize,
}

/// In-memory ORPHA mapping table with indexes in both directions.
#[derive(Debug, Clone, Default)]
pub struct OrphaCodeTable {
    names: HashMap<String, Vec<String>>,
    orpha_to_icd10: HashMap<String, Vec<MappingEntry>>,
    icd10_to_orpha: HashMap<String, Vec<MappingEntry>>,
    stats: OrphaTableStats,
}

/// One row of the mapping file.
#[derive(Debug, Deserialize)]
struct MappingRow {
    orpha_code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    icd10_code: String,
    #[serde(default)]
    mapping_type: String,
}

impl OrphaCodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mapping file.
    ///
    /// The file has a header row with the columns `orpha_code`, `name`,
    /// `icd10_code` and `mapping_type`, separated by tabs or commas. ORPHA
    /// codes may carry the `ORPHA:` prefix; ICD-10 codes may carry the
    /// `urn:miriam:icd:` prefix. Rows without an ICD-10 code only register
    /// the ORPHA code and its name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| DircheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| DircheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_bytes(&contents)
    }

    /// Parse a mapping table from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let delimiter = detect_delimiter(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let mut table = Self::new();
        for (line, record) in reader.deserialize::<MappingRow>().enumerate() {
            let row = record?;
            let orpha = strip_orpha_prefix(&row.orpha_code);
            if orpha.is_empty() {
                warn!(line = line + 2, "Skipping mapping row without ORPHA code");
                table.stats.skipped_rows += 1;
                continue;
            }

            let icd10 = row.icd10_code.trim_start_matches(ICD10_PREFIX);
            if icd10.is_empty() {
                table.add_mapping(orpha, &row.name, None);
                continue;
            }

            match row.mapping_type.parse::<MappingType>() {
                Ok(mapping_type) => table.add_mapping(orpha, &row.name, Some((icd10, mapping_type))),
                Err(e) => {
                    // The ORPHA code itself stays valid; only the ICD-10 link is dropped.
                    table.add_mapping(orpha, &row.name, None);
                    warn!(line = line + 2, orpha, icd10, error = %e, "Skipping mapping row");
                    table.stats.skipped_rows += 1;
                }
            }
        }

        if table.names.is_empty() {
            return Err(DircheckError::Mapping(
                "mapping table contains no ORPHA codes".to_string(),
            ));
        }
        Ok(table)
    }

    /// Register an ORPHA code, its name and optionally one ICD-10 translation.
    ///
    /// The reverse ICD-10 → ORPHA entry reuses the same mapping type.
    pub fn add_mapping(
        &mut self,
        orpha_code: &str,
        name: &str,
        icd10: Option<(&str, MappingType)>,
    ) {
        let orpha_code = strip_orpha_prefix(orpha_code).to_string();
        let names = self.names.entry(orpha_code.clone()).or_default();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }

        if let Some((icd10_code, mapping_type)) = icd10 {
            let forward = self.orpha_to_icd10.entry(orpha_code.clone()).or_default();
            if !forward.iter().any(|e| e.code == icd10_code) {
                forward.push(MappingEntry::new(icd10_code, mapping_type));
                self.icd10_to_orpha
                    .entry(icd10_code.to_string())
                    .or_default()
                    .push(MappingEntry::new(orpha_code, mapping_type));
                self.stats.mappings += 1;
            }
        }
        self.stats.orpha_codes = self.names.len();
        self.stats.icd10_codes = self.icd10_to_orpha.len();
    }

    /// Statistics about the loaded data.
    pub fn stats(&self) -> &OrphaTableStats {
        &self.stats
    }
}

impl OrphaMapper for OrphaCodeTable {
    fn is_valid_orpha_code(&self, entry: &str) -> bool {
        entry
            .strip_prefix(ORPHA_PREFIX)
            .is_some_and(|code| self.names.contains_key(code))
    }

    fn icd10_to_orpha(&self, icd10_code: &str) -> Vec<MappingEntry> {
        self.icd10_to_orpha
            .get(icd10_code)
            .cloned()
            .unwrap_or_default()
    }

    fn orpha_to_icd10(&self, orpha_code: &str) -> Vec<MappingEntry> {
        self.orpha_to_icd10
            .get(orpha_code)
            .cloned()
            .unwrap_or_default()
    }

    fn orpha_to_names_string(&self, orpha_code: &str) -> String {
        self.names
            .get(orpha_code)
            .map(|names| names.join("; "))
            .unwrap_or_default()
    }
}

fn strip_orpha_prefix(code: &str) -> &str {
    code.trim().trim_start_matches(ORPHA_PREFIX)
}

/// Tab wins when the header line contains one; otherwise comma.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    if header.contains(&b'\t') { b'\t' } else { b',' }
}
