//! DirCheck: data quality checks for a biobank directory.
//!
//! DirCheck loads a snapshot of biobanks, collections, contacts and
//! networks, runs a set of independent checks over it and reports warnings
//! grouped by the national node responsible for fixing them.
//!
//! # Core Principles
//!
//! - **Read-only**: The directory is never modified
//! - **Tri-state coding**: ICD-10 codes are cancer, not cancer or unknown
//! - **Per-node reporting**: Every warning names the national node it belongs to
//!
//! # Example
//!
//! ```no_run
//! use dircheck::{DirCheck, DirCheckConfig};
//!
//! let config = DirCheckConfig::default().with_orpha_mapping("orpha_icd10.tsv");
//! let dircheck = DirCheck::with_config(config);
//! let report = dircheck.check_file("directory.json").unwrap();
//!
//! println!("Errors: {}", report.summary.by_level.error);
//! for warning in report.for_national_node("CZ") {
//!     println!("{}", warning);
//! }
//! ```

pub mod coding;
pub mod config;
pub mod directory;
pub mod error;
pub mod report;
pub mod validation;

mod dircheck;

pub use crate::dircheck::DirCheck;
pub use coding::{Classification, DiagnosisPartition, OrphaCodeTable, OrphaMapper};
pub use config::DirCheckConfig;
pub use directory::{Directory, DirectorySnapshot};
pub use error::{DircheckError, Result};
pub use report::{CheckReport, ReportEntry, ReportSummary};
pub use validation::{Check, CheckEngine, EntityType, Warning, WarningLevel, WarningSink};
