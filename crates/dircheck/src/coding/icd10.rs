//! ICD-10 oncology classification.
//!
//! Decides whether an ICD-10 code, a two-code range, or a chapter numeral
//! denotes a neoplasm. Inputs that cannot be parsed are reported as
//! [`Classification::Unknown`] rather than coerced to a yes/no answer.
//!
//! # Example
//!
//! ```
//! use dircheck::coding::{is_cancer_chapter, is_cancer_code, Classification};
//!
//! assert_eq!(is_cancer_code("C50.9"), Classification::Cancer);
//! assert_eq!(is_cancer_code("E10-E14"), Classification::NotCancer);
//! assert_eq!(is_cancer_code("not-a-code"), Classification::Unknown);
//! assert_eq!(is_cancer_chapter("II"), Classification::Cancer);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static SINGLE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<block>[A-Z])(?P<code>\d{1,2})(\.(?P<subcode>\d+))?$").unwrap()
});

static CODE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<from>[A-Z]\d{1,2}(\.\d+)?)-(?P<to>[A-Z]\d{1,2}(\.\d+)?)$").unwrap()
});

/// Codes introduced by later ICD-10 revisions that do not follow the
/// letter-plus-digits shape.
const EXTRA_CANCER_CODES: &[&str] = &["C7A", "C7B", "D3A"];

/// Highest `D` code that still belongs to the neoplasm chapter.
const LAST_NEOPLASM_D_CODE: u32 = 48;

/// ICD-10 chapters as roman numerals; chapter XXII was added in 2020.
pub const ICD10_CHAPTERS: [&str; 22] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
    "XV", "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII",
];

/// Chapter II: Neoplasms.
const NEOPLASM_CHAPTER: &str = "II";

/// Result of classifying a code or chapter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// The token denotes an oncological diagnosis.
    Cancer,
    /// The token is well-formed but not oncological.
    NotCancer,
    /// The token could not be parsed.
    Unknown,
}

impl Classification {
    /// Whether the token was classified as oncological.
    pub fn is_cancer(&self) -> bool {
        matches!(self, Classification::Cancer)
    }

    /// Whether the token could be classified at all.
    pub fn is_known(&self) -> bool {
        !matches!(self, Classification::Unknown)
    }

    /// Convert to a tri-state boolean.
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Classification::Cancer => Some(true),
            Classification::NotCancer => Some(false),
            Classification::Unknown => None,
        }
    }

    fn from_bool(cancer: bool) -> Self {
        if cancer {
            Classification::Cancer
        } else {
            Classification::NotCancer
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Cancer => "TRUE",
            Classification::NotCancer => "FALSE",
            Classification::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Classify an ICD-10 code or a `<code>-<code>` range.
///
/// The input must already be stripped of any `urn:miriam:icd:` prefix.
/// A range is oncological when either endpoint is; ranges nested inside
/// ranges do not parse and yield [`Classification::Unknown`].
pub fn is_cancer_code(code: &str) -> Classification {
    if EXTRA_CANCER_CODES.contains(&code) {
        return Classification::Cancer;
    }

    if let Some(caps) = SINGLE_CODE.captures(code) {
        let block = &caps["block"];
        let number = &caps["code"];
        debug!(
            block,
            code = number,
            subcode = ?caps.name("subcode").map(|m| m.as_str()),
            "ICD-10 block detected"
        );
        return Classification::from_bool(is_neoplasm_block(block, number));
    }

    if let Some(caps) = CODE_RANGE.captures(code) {
        let from = &caps["from"];
        let to = &caps["to"];
        debug!(from, to, "ICD-10 range of blocks detected");
        let cancer = is_cancer_code(from).is_cancer() || is_cancer_code(to).is_cancer();
        return Classification::from_bool(cancer);
    }

    Classification::Unknown
}

/// Classify an ICD-10 chapter given as a roman numeral (`I` to `XXII`).
pub fn is_cancer_chapter(chapter: &str) -> Classification {
    if !ICD10_CHAPTERS.contains(&chapter) {
        return Classification::Unknown;
    }
    debug!(chapter, "ICD-10 chapter detected");
    Classification::from_bool(chapter == NEOPLASM_CHAPTER)
}

fn is_neoplasm_block(block: &str, number: &str) -> bool {
    match block {
        "C" => true,
        // The regex guarantees one or two ASCII digits.
        "D" => number
            .parse::<u32>()
            .map(|n| n <= LAST_NEOPLASM_D_CODE)
            .unwrap_or(false),
        _ => false,
    }
}
