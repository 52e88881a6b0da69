//! Diagnosis tokens declared on collections.

use serde::Serialize;

use crate::coding::icd10::{is_cancer_code, Classification};
use crate::coding::orpha::OrphaMapper;

/// URN prefix of ICD-10 diagnosis tokens.
pub const ICD10_PREFIX: &str = "urn:miriam:icd:";

/// Prefix of ORPHA diagnosis tokens.
pub const ORPHA_PREFIX: &str = "ORPHA:";

/// Shape of a single `diagnosis_available` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisCode<'a> {
    /// `urn:miriam:icd:<code>`; holds the code without the prefix.
    Icd10(&'a str),
    /// `ORPHA:<id>`; holds the id without the prefix.
    Orpha(&'a str),
    /// Any other token.
    Other(&'a str),
}

impl<'a> DiagnosisCode<'a> {
    /// Split a raw token into its coding system and code.
    pub fn parse(token: &'a str) -> Self {
        if let Some(code) = token.strip_prefix(ICD10_PREFIX) {
            DiagnosisCode::Icd10(code)
        } else if let Some(code) = token.strip_prefix(ORPHA_PREFIX) {
            DiagnosisCode::Orpha(code)
        } else {
            DiagnosisCode::Other(token)
        }
    }

    /// Whether the raw token is written as a range.
    pub fn is_range(token: &str) -> bool {
        token.contains('-')
    }

    /// Oncology classification; only ICD-10 tokens can be classified.
    pub fn classification(&self) -> Classification {
        match self {
            DiagnosisCode::Icd10(code) => is_cancer_code(code),
            DiagnosisCode::Orpha(_) | DiagnosisCode::Other(_) => Classification::Unknown,
        }
    }
}

/// Diagnoses of one collection split by coding system.
///
/// Computed fresh for every collection from its `diagnosis_available` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosisPartition {
    /// Every declared token, in declaration order.
    pub diags: Vec<String>,
    /// Tokens written as ranges.
    pub ranges: Vec<String>,
    /// ICD-10 codes without the URN prefix.
    pub icd10: Vec<String>,
    /// Accepted ORPHA ids without the `ORPHA:` prefix.
    pub orpha: Vec<String>,
    /// ORPHA tokens rejected by the mapper, as declared.
    pub invalid_orpha: Vec<String>,
}

impl DiagnosisPartition {
    /// Partition the declared tokens.
    ///
    /// ORPHA tokens are only collected when a mapper is available: known
    /// codes go to `orpha`, unknown ones to `invalid_orpha`.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], mapper: Option<&dyn OrphaMapper>) -> Self {
        let mut partition = Self::default();

        for token in tokens {
            let token = token.as_ref();
            partition.diags.push(token.to_string());
            if DiagnosisCode::is_range(token) {
                partition.ranges.push(token.to_string());
            }

            match DiagnosisCode::parse(token) {
                DiagnosisCode::Icd10(code) => partition.icd10.push(code.to_string()),
                DiagnosisCode::Orpha(code) => match mapper {
                    Some(m) if m.is_valid_orpha_code(token) => {
                        partition.orpha.push(code.to_string())
                    }
                    Some(_) => partition.invalid_orpha.push(token.to_string()),
                    None => {}
                },
                DiagnosisCode::Other(_) => {}
            }
        }

        partition
    }

    /// Whether the ICD-10 code (without prefix) is declared.
    pub fn has_icd10(&self, code: &str) -> bool {
        self.icd10.iter().any(|c| c == code)
    }

    /// Oncology classification of every declared ICD-10 code.
    pub fn classify_icd10(&self) -> impl Iterator<Item = (&str, Classification)> {
        self.icd10
            .iter()
            .map(|code| (code.as_str(), is_cancer_code(code)))
    }

    /// Number of declared ICD-10 codes classified as oncological.
    pub fn oncological_count(&self) -> usize {
        self.icd10
            .iter()
            .filter(|code| is_cancer_code(code).is_cancer())
            .count()
    }
}
