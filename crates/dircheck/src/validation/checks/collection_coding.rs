//! Clinical coding consistency of collection diagnoses.
//!
//! Rules, in emission order:
//!
//! 1. ORPHA codes rejected by the mapper (ERROR, one per code) and diagnosis
//!    ranges (ERROR, one combined message).
//! 2. Clinical collection types without diagnoses (ERROR) and diagnoses on
//!    non-clinical collections (INFO).
//! 3. Rare-disease cross-checks between ORPHA and ICD-10 codes (WARNING),
//!    with translation suggestions from the mapper (INFO).
//!
//! Everything that needs the ORPHA mapper is skipped silently when the
//! directory has none.

use tracing::{debug, info};

use crate::coding::{DiagnosisPartition, ICD10_PREFIX, ORPHA_PREFIX, OrphaMapper};
use crate::directory::{Collection, CollectionType, Directory};
use crate::error::Result;
use crate::validation::sink::WarningSink;
use crate::validation::warning::{EntityType, Warning, WarningLevel};

use super::{Check, CheckOptions};

const CHECK_NAME: &str = "CollectionCoding";

/// Coding consistency check over every collection.
pub struct CollectionCoding;

impl Check for CollectionCoding {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn evaluate(&self, directory: &Directory, _options: &CheckOptions) -> Result<Vec<Warning>> {
        info!("Running collection coding checks ({})", CHECK_NAME);
        let mapper = directory.orpha_mapper();
        let mut sink = WarningSink::new();

        for collection in directory.collections() {
            let nn = directory.collection_nn(&collection.id)?;
            validate_collection_coding(collection, nn, mapper, &mut sink);
        }

        Ok(sink.into_warnings())
    }
}

/// Validate the diagnoses of one collection and append findings to `sink`.
///
/// `nn` is the national node recorded as the warning location. Returns the
/// diagnosis partition the rules were evaluated on.
pub fn validate_collection_coding(
    collection: &Collection,
    nn: &str,
    mapper: Option<&dyn OrphaMapper>,
    sink: &mut WarningSink,
) -> DiagnosisPartition {
    let partition = DiagnosisPartition::from_tokens(&collection.diagnosis_available, mapper);
    debug!(
        collection = %collection.id,
        diagnoses = partition.diags.len(),
        icd10 = partition.icd10.len(),
        orpha = partition.orpha.len(),
        oncological = partition.oncological_count(),
        "Diagnosis partition"
    );

    let mut emit = |level: WarningLevel, message: String| {
        sink.push(Warning::new(
            CHECK_NAME,
            nn,
            level,
            &collection.id,
            EntityType::Collection,
            message,
        ));
    };

    for token in &partition.invalid_orpha {
        emit(
            WarningLevel::Error,
            format!("Invalid ORPHA code found: {}", token),
        );
    }

    if !partition.ranges.is_empty() {
        emit(
            WarningLevel::Error,
            format!(
                "It seems that diagnoses contains range - this will render the diagnosis search \
                 ineffective for the given collection. Violating diagnosis term(s): {}",
                partition.ranges.join("; ")
            ),
        );
    }

    let clinical = collection.is_clinical();
    if clinical && partition.diags.is_empty() {
        emit(
            WarningLevel::Error,
            "No diagnoses provided for HOSPITAL or DISEASE_SPECIFIC or RD collection".to_string(),
        );
    }
    if !clinical && !partition.diags.is_empty() {
        emit(
            WarningLevel::Info,
            "Diagnoses provided but none of HOSPITAL, DISEASE_SPECIFIC, RD is specified as \
             collection type (this may be easily false positive check)"
                .to_string(),
        );
    }

    let rare_disease = collection.has_type(CollectionType::Rd);
    if rare_disease && partition.orpha.is_empty() {
        emit(
            WarningLevel::Warning,
            "Rare disease (RD) collection without ORPHA code diagnoses".to_string(),
        );
        if let Some(mapper) = mapper {
            for code in &partition.icd10 {
                let candidates = mapper.icd10_to_orpha(code);
                if candidates.is_empty() {
                    continue;
                }
                let suggestions: Vec<String> = candidates
                    .iter()
                    .map(|entry| {
                        format!(
                            "{}{}({})/{}",
                            ORPHA_PREFIX,
                            entry.code,
                            mapper.orpha_to_names_string(&entry.code),
                            entry.mapping_type
                        )
                    })
                    .collect();
                emit(
                    WarningLevel::Info,
                    format!(
                        "Consider adding following ORPHA code(s) to the RD collection - based on \
                         mapping ICD-10 code {} to ORPHA codes: {}",
                        code,
                        suggestions.join(",")
                    ),
                );
            }
        }
    }

    if !partition.orpha.is_empty() && !rare_disease {
        emit(
            WarningLevel::Warning,
            "ORPHA code diagnoses provided, but collection not marked as rare disease (RD) \
             collection"
                .to_string(),
        );
    }

    if !partition.orpha.is_empty() && partition.icd10.is_empty() {
        emit(
            WarningLevel::Warning,
            "ORPHA code diagnoses specified, but no ICD-10 equivalents provided, thus making \
             collection impossible to find for users using ICD-10 codes"
                .to_string(),
        );
    }

    if let Some(mapper) = mapper {
        for orpha in &partition.orpha {
            for translation in mapper.orpha_to_icd10(orpha) {
                // Declared codes are held without the prefix, so a declared
                // translation still gets the recommendation.
                if partition.has_icd10(&format!("{}{}", ICD10_PREFIX, translation.code)) {
                    continue;
                }
                emit(
                    WarningLevel::Info,
                    format!(
                        "ORPHA code {} provided, but its translation to ICD-10 as {}{} is not \
                         provided (mapping is of {} type). It is recommended to provide this \
                         translation explicitly until Directory implements full semantic \
                         mapping search.",
                        orpha, ICD10_PREFIX, translation.code, translation.mapping_type
                    ),
                );
            }
        }
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::{MappingType, OrphaCodeTable};

    fn mapper() -> OrphaCodeTable {
        let mut table = OrphaCodeTable::new();
        table.add_mapping("558", "Marfan syndrome", Some(("Q87.4", MappingType::Exact)));
        table.add_mapping("355", "Gaucher disease", Some(("E75.2", MappingType::Narrower)));
        table
    }

    fn collection(types: &[CollectionType], diagnoses: &[&str]) -> Collection {
        Collection::new("bbmri-eric:ID:CZ_MMCI:collection:1", "bbmri-eric:ID:CZ_MMCI", 2)
            .with_types(types.iter().copied())
            .with_diagnoses(diagnoses.iter().copied())
    }

    fn run(collection: &Collection, mapper: Option<&dyn OrphaMapper>) -> Vec<Warning> {
        let mut sink = WarningSink::new();
        validate_collection_coding(collection, "CZ", mapper, &mut sink);
        sink.into_warnings()
    }

    fn levels(warnings: &[Warning]) -> Vec<WarningLevel> {
        warnings.iter().map(|w| w.level).collect()
    }

    #[test]
    fn test_clean_collection() {
        let table = mapper();
        let c = collection(&[CollectionType::Hospital], &["urn:miriam:icd:C50"]);
        assert!(run(&c, Some(&table)).is_empty());
    }

    #[test]
    fn test_hospital_without_diagnoses() {
        let c = collection(&[CollectionType::Hospital], &[]);
        let warnings = run(&c, None);
        assert_eq!(levels(&warnings), vec![WarningLevel::Error]);
        assert!(warnings[0].message.starts_with("No diagnoses provided"));
        assert_eq!(warnings[0].location, "CZ");
        assert_eq!(warnings[0].check_name, "CollectionCoding");
    }

    #[test]
    fn test_diagnoses_on_non_clinical_collection() {
        let c = collection(&[CollectionType::Cohort], &["urn:miriam:icd:C50"]);
        let warnings = run(&c, None);
        assert_eq!(levels(&warnings), vec![WarningLevel::Info]);
    }

    #[test]
    fn test_ranges_are_reported_once() {
        let c = collection(
            &[CollectionType::Hospital],
            &["urn:miriam:icd:C50-C50", "urn:miriam:icd:C00-D49"],
        );
        let warnings = run(&c, None);
        assert_eq!(levels(&warnings), vec![WarningLevel::Error]);
        assert!(warnings[0]
            .message
            .ends_with("urn:miriam:icd:C50-C50; urn:miriam:icd:C00-D49"));
    }

    #[test]
    fn test_invalid_orpha_precedes_range_error() {
        let table = mapper();
        let c = collection(
            &[CollectionType::Rd],
            &["ORPHA:99999", "urn:miriam:icd:E75-E76"],
        );
        let warnings = run(&c, Some(&table));
        assert_eq!(warnings[0].message, "Invalid ORPHA code found: ORPHA:99999");
        assert!(warnings[1].message.contains("contains range"));
        assert_eq!(
            warnings[2].message,
            "Rare disease (RD) collection without ORPHA code diagnoses"
        );
    }

    #[test]
    fn test_rd_without_orpha_suggests_codes() {
        let table = mapper();
        let c = collection(&[CollectionType::Rd], &["urn:miriam:icd:E75.2"]);
        let warnings = run(&c, Some(&table));

        assert_eq!(levels(&warnings), vec![WarningLevel::Warning, WarningLevel::Info]);
        assert_eq!(
            warnings[1].message,
            "Consider adding following ORPHA code(s) to the RD collection - based on mapping \
             ICD-10 code E75.2 to ORPHA codes: ORPHA:355(Gaucher disease)/NARROWER"
        );
    }

    #[test]
    fn test_rd_without_orpha_and_without_mapper() {
        let c = collection(&[CollectionType::Rd], &["urn:miriam:icd:E75.2"]);
        assert_eq!(levels(&run(&c, None)), vec![WarningLevel::Warning]);
    }

    #[test]
    fn test_orpha_on_non_rd_collection() {
        let table = mapper();
        let c = collection(
            &[CollectionType::Hospital],
            &["ORPHA:558", "urn:miriam:icd:Q87.4"],
        );
        let warnings = run(&c, Some(&table));
        assert_eq!(levels(&warnings), vec![WarningLevel::Warning]);
        assert!(warnings[0].message.contains("not marked as rare disease"));
    }

    #[test]
    fn test_declared_translation_is_still_recommended() {
        let table = mapper();
        let c = collection(&[CollectionType::Rd], &["ORPHA:558", "urn:miriam:icd:Q87.4"]);
        let warnings = run(&c, Some(&table));
        assert_eq!(levels(&warnings), vec![WarningLevel::Info]);
        assert!(warnings[0].message.contains("urn:miriam:icd:Q87.4"));
    }

    #[test]
    fn test_missing_translation_is_suggested() {
        let table = mapper();
        let c = collection(&[CollectionType::Rd], &["ORPHA:558", "urn:miriam:icd:C50"]);
        let warnings = run(&c, Some(&table));
        assert_eq!(levels(&warnings), vec![WarningLevel::Info]);
        assert!(warnings[0]
            .message
            .starts_with("ORPHA code 558 provided, but its translation to ICD-10 as urn:miriam:icd:Q87.4"));
        assert!(warnings[0].message.contains("(mapping is of EXACT type)"));
    }

    #[test]
    fn test_partition_is_returned() {
        let c = collection(&[CollectionType::Hospital], &["urn:miriam:icd:C50", "ORPHA:1"]);
        let mut sink = WarningSink::new();
        let partition = validate_collection_coding(&c, "CZ", None, &mut sink);
        assert_eq!(partition.icd10, vec!["C50"]);
        assert!(partition.orpha.is_empty());
        assert!(sink.is_empty());
    }
}
