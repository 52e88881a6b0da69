//! Property-based tests for ICD-10 classification and diagnosis partitioning.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p dircheck --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p dircheck --test property_tests
//! ```

use proptest::prelude::*;

use dircheck::coding::{
    is_cancer_chapter, is_cancer_code, DiagnosisPartition, ICD10_CHAPTERS,
};
use dircheck::Classification;

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary short strings, mostly ASCII.
fn any_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9.\\-:_ ]{0,30}",
        ".{0,30}",
    ]
}

/// Optional `.<digits>` suffix.
fn subcode() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "\\.[0-9]{1,3}"]
}

/// Single ICD-10 codes outside the C and D blocks.
fn non_neoplasm_code() -> impl Strategy<Value = String> {
    ("[ABE-Z]", 0u32..100, subcode())
        .prop_map(|(block, n, sub)| format!("{}{:02}{}", block, n, sub))
}

/// Diagnosis tokens as they appear in directory records.
fn diagnosis_token() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[A-Z]", 0u32..100).prop_map(|(b, n)| format!("urn:miriam:icd:{}{:02}", b, n)),
        ("[A-Z]", 0u32..100, "[A-Z]", 0u32..100)
            .prop_map(|(a, n, b, m)| format!("urn:miriam:icd:{}{:02}-{}{:02}", a, n, b, m)),
        (1u32..1_000_000).prop_map(|n| format!("ORPHA:{}", n)),
        "[a-z]{1,10}",
    ]
}

// =============================================================================
// Classifier
// =============================================================================

proptest! {
    #[test]
    fn classifier_never_panics(token in any_token()) {
        let _ = is_cancer_code(&token);
        let _ = is_cancer_chapter(&token);
    }

    #[test]
    fn classifier_is_deterministic(token in any_token()) {
        prop_assert_eq!(is_cancer_code(&token), is_cancer_code(&token));
        prop_assert_eq!(is_cancer_chapter(&token), is_cancer_chapter(&token));
    }

    #[test]
    fn c_block_is_cancer(n in 0u32..=97, sub in subcode()) {
        let code = format!("C{:02}{}", n, sub);
        prop_assert_eq!(is_cancer_code(&code), Classification::Cancer);
    }

    #[test]
    fn d_block_up_to_48_is_cancer(n in 0u32..=48, sub in subcode()) {
        let code = format!("D{:02}{}", n, sub);
        prop_assert_eq!(is_cancer_code(&code), Classification::Cancer);
    }

    #[test]
    fn d_block_from_49_is_not_cancer(n in 49u32..=99, sub in subcode()) {
        let code = format!("D{:02}{}", n, sub);
        prop_assert_eq!(is_cancer_code(&code), Classification::NotCancer);
    }

    #[test]
    fn other_blocks_are_not_cancer(code in non_neoplasm_code()) {
        prop_assert_eq!(is_cancer_code(&code), Classification::NotCancer);
    }

    #[test]
    fn range_is_union_of_endpoints(a in non_neoplasm_code(), n in 0u32..=97) {
        let cancer = format!("C{:02}", n);
        prop_assert_eq!(is_cancer_code(&format!("{}-{}", a, cancer)), Classification::Cancer);
        prop_assert_eq!(is_cancer_code(&format!("{}-{}", cancer, a)), Classification::Cancer);
        prop_assert_eq!(is_cancer_code(&format!("{}-{}", a, a)), Classification::NotCancer);
    }

    #[test]
    fn nested_ranges_are_unknown(a in 0u32..100, b in 0u32..100, c in 0u32..100) {
        let code = format!("C{:02}-C{:02}-C{:02}", a, b, c);
        prop_assert_eq!(is_cancer_code(&code), Classification::Unknown);
    }

    #[test]
    fn unknown_chapters(chapter in "[IVXL]{1,6}") {
        let expected = if !ICD10_CHAPTERS.contains(&chapter.as_str()) {
            Classification::Unknown
        } else if chapter == "II" {
            Classification::Cancer
        } else {
            Classification::NotCancer
        };
        prop_assert_eq!(is_cancer_chapter(&chapter), expected);
    }
}

// =============================================================================
// Diagnosis partition
// =============================================================================

proptest! {
    #[test]
    fn partition_keeps_every_token(tokens in prop::collection::vec(diagnosis_token(), 0..20)) {
        let partition = DiagnosisPartition::from_tokens(&tokens, None);

        prop_assert_eq!(&partition.diags, &tokens);
        prop_assert!(partition.orpha.is_empty());
        prop_assert!(partition.invalid_orpha.is_empty());
        prop_assert_eq!(
            partition.icd10.len(),
            tokens.iter().filter(|t| t.starts_with("urn:miriam:icd:")).count()
        );
        prop_assert_eq!(
            partition.ranges.len(),
            tokens.iter().filter(|t| t.contains('-')).count()
        );
        prop_assert!(partition.oncological_count() <= partition.icd10.len());
    }
}
