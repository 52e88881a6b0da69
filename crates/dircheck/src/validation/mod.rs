//! Validation engine for detecting directory data quality issues.

mod checks;
mod engine;
mod sink;
mod warning;

pub use checks::{
    all_checks, validate_collection_coding, Check, CheckOptions, CollectionCoding,
    CollectionContent, NationalNodes, ValidateIds,
};
pub use engine::CheckEngine;
pub use sink::{LevelCounts, WarningSink};
pub use warning::{EntityType, Warning, WarningLevel};
