//! Fuzz target for ICD-10 classification and diagnosis partitioning.
//!
//! The classifier must never panic and must return the same answer twice.

#![no_main]

use libfuzzer_sys::fuzz_target;
use dircheck::coding::{is_cancer_chapter, is_cancer_code, DiagnosisPartition};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let first = is_cancer_code(&input);
    assert_eq!(first, is_cancer_code(&input));
    let _ = is_cancer_chapter(&input);

    let tokens: Vec<&str> = input.split(',').collect();
    let partition = DiagnosisPartition::from_tokens(&tokens, None);
    assert_eq!(partition.diags.len(), tokens.len());
    let _ = partition.oncological_count();
});
