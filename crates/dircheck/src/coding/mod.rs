//! Clinical coding support.
//!
//! This module provides the pieces the collection coding checks are built
//! from:
//!
//! - ICD-10 oncology classification of codes, ranges and chapters
//! - Parsing and partitioning of `diagnosis_available` tokens
//! - ORPHA code validation and ORPHA↔ICD-10 translation tables

mod diagnosis;
mod icd10;
mod orpha;

pub use diagnosis::{DiagnosisCode, DiagnosisPartition, ICD10_PREFIX, ORPHA_PREFIX};
pub use icd10::{is_cancer_chapter, is_cancer_code, Classification, ICD10_CHAPTERS};
pub use orpha::{MappingEntry, MappingType, OrphaCodeTable, OrphaMapper, OrphaTableStats};
