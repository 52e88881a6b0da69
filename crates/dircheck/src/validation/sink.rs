//! Accumulator for warnings.

use serde::{Deserialize, Serialize};

use super::warning::{Warning, WarningLevel};

/// Counts of warnings by level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl LevelCounts {
    /// Count one more warning of the given level.
    pub fn add(&mut self, level: WarningLevel) {
        match level {
            WarningLevel::Error => self.error += 1,
            WarningLevel::Warning => self.warning += 1,
            WarningLevel::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }
}

/// Append-only list of warnings in emission order.
///
/// No deduplication happens here. Parallel runs keep one sink per worker
/// and [`merge`](Self::merge) them afterwards.
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
    warnings: Vec<Warning>,
}

impl WarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.warnings.extend(warnings);
    }

    /// Append everything collected by another sink.
    pub fn merge(&mut self, other: WarningSink) {
        self.warnings.extend(other.warnings);
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn count_by_level(&self) -> LevelCounts {
        let mut counts = LevelCounts::default();
        for warning in &self.warnings {
            counts.add(warning.level);
        }
        counts
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::warning::EntityType;

    fn warning(level: WarningLevel, message: &str) -> Warning {
        Warning::new("Test", "CZ", level, "id", EntityType::Biobank, message)
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let mut sink = WarningSink::new();
        sink.push(warning(WarningLevel::Info, "a"));
        sink.push(warning(WarningLevel::Info, "a"));
        sink.extend([warning(WarningLevel::Error, "b")]);

        let messages: Vec<_> = sink.warnings().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_merge_and_counts() {
        let mut left = WarningSink::new();
        left.push(warning(WarningLevel::Error, "x"));
        let mut right = WarningSink::new();
        right.push(warning(WarningLevel::Warning, "y"));
        right.push(warning(WarningLevel::Info, "z"));

        left.merge(right);
        let counts = left.count_by_level();
        assert_eq!(left.len(), 3);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.info, 1);
        assert_eq!(counts.total(), 3);
    }
}
