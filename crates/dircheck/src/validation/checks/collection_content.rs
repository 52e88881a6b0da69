//! Collection content rules unrelated to diagnosis coding: types, sizes,
//! sample materials, medical records and imaging metadata.

use tracing::info;

use crate::directory::{Collection, DataCategory, Directory};
use crate::error::Result;
use crate::validation::warning::{EntityType, Warning, WarningLevel};

use super::{Check, CheckOptions};

const CHECK_NAME: &str = "CollectionContent";

/// Above this order of magnitude a collection should have subcollections.
const SUBCOLLECTION_OOM: u8 = 4;

/// Above this order of magnitude a collection should state its exact size.
const EXACT_SIZE_OOM: u8 = 5;

/// Structural consistency of collection records.
pub struct CollectionContent;

impl Check for CollectionContent {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn evaluate(&self, directory: &Directory, _options: &CheckOptions) -> Result<Vec<Warning>> {
        info!("Running collection content checks ({})", CHECK_NAME);
        let mut warnings = Vec::new();

        for collection in directory.collections() {
            let nn = directory.collection_nn(&collection.id)?;
            let has_subcollections = !directory.collection_descendants(&collection.id)?.is_empty();
            for (level, message) in content_findings(collection, has_subcollections) {
                warnings.push(Warning::new(
                    CHECK_NAME,
                    nn,
                    level,
                    &collection.id,
                    EntityType::Collection,
                    message,
                ));
            }
        }

        Ok(warnings)
    }
}

fn content_findings(collection: &Collection, has_subcollections: bool) -> Vec<(WarningLevel, String)> {
    let mut findings = Vec::new();
    let oom = collection.order_of_magnitude;

    if collection.collection_type.is_empty() {
        findings.push((WarningLevel::Error, "Collection type not provided".to_string()));
    }

    if let Some(size) = collection.size {
        if !size_matches_magnitude(size, oom) {
            findings.push((
                WarningLevel::Error,
                format!(
                    "Size of the collection does not match its order of magnitude: size = {}, \
                     order of magnitude is {} (size between {} and {})",
                    size,
                    oom,
                    display_power_of_ten(oom),
                    display_power_of_ten(oom.saturating_add(1))
                ),
            ));
        }
    }

    if oom > SUBCOLLECTION_OOM && !has_subcollections {
        findings.push((
            WarningLevel::Info,
            "Suspicious situation: large collection (> 100,000 samples or cases) without \
             subcollections; unless it is a really homogeneous collection, it is advisable to \
             refine such a collection into sub-collections to give users better insight into \
             what is stored there"
                .to_string(),
        ));
    }

    if oom > EXACT_SIZE_OOM && collection.size.unwrap_or(0) == 0 {
        findings.push((
            WarningLevel::Info,
            "Suspicious situation: large collection (> 1,000,000 samples or cases) without exact \
             size specified"
                .to_string(),
        ));
    }

    let biological_samples = collection.has_data_category(DataCategory::BiologicalSamples);
    if biological_samples && collection.materials.is_empty() {
        findings.push((
            WarningLevel::Error,
            "No material types are provided while biological samples are collected".to_string(),
        ));
    }
    if !collection.materials.is_empty() && !biological_samples {
        findings.push((
            WarningLevel::Error,
            "Sample types advertised but BIOLOGICAL_SAMPLES missing among its data categories"
                .to_string(),
        ));
    }

    let medical_records = collection.has_data_category(DataCategory::MedicalRecords);
    let has_diagnoses = !collection.diagnosis_available.is_empty();
    if medical_records && !has_diagnoses {
        findings.push((
            WarningLevel::Warning,
            "No diagnoses provided for a collection with MEDICAL_RECORDS among its data categories"
                .to_string(),
        ));
    }
    if has_diagnoses && !medical_records {
        findings.push((
            WarningLevel::Warning,
            "Diagnoses provided but no MEDICAL_RECORDS among its data categories".to_string(),
        ));
    }

    let imaging = collection.has_data_category(DataCategory::ImagingData);
    if imaging {
        if collection.imaging_modality.is_empty() {
            findings.push((
                WarningLevel::Error,
                "No image modalities provided for image collection".to_string(),
            ));
        }
        if collection.image_dataset_type.is_empty() {
            findings.push((
                WarningLevel::Warning,
                "No image dataset types provided for image collection".to_string(),
            ));
        }
    }
    let has_imaging_metadata =
        !collection.imaging_modality.is_empty() || !collection.image_dataset_type.is_empty();
    if has_imaging_metadata && !imaging {
        findings.push((
            WarningLevel::Error,
            format!(
                "Imaging modalities or image data set found, but IMAGING_DATA is not among data \
                 categories: image_modality = {:?}, image_dataset_type = {:?}",
                collection.imaging_modality, collection.image_dataset_type
            ),
        ));
    }

    findings
}

/// Sizes may undershoot the bucket for orders of magnitude 0 and 1.
fn size_matches_magnitude(size: u64, oom: u8) -> bool {
    let too_small = oom > 1 && power_of_ten(oom).is_none_or(|lower| size < lower);
    let too_large = power_of_ten(oom.saturating_add(1)).is_some_and(|upper| size > upper);
    !too_small && !too_large
}

fn power_of_ten(exp: u8) -> Option<u64> {
    10u64.checked_pow(u32::from(exp))
}

fn display_power_of_ten(exp: u8) -> String {
    power_of_ten(exp)
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("10^{}", exp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::CollectionType;

    fn base(oom: u8) -> Collection {
        Collection::new("c", "b", oom).with_types([CollectionType::Cohort])
    }

    fn messages(collection: &Collection, has_subcollections: bool) -> Vec<String> {
        content_findings(collection, has_subcollections)
            .into_iter()
            .map(|(_, m)| m)
            .collect()
    }

    #[test]
    fn test_clean_collection() {
        assert!(messages(&base(2).with_size(500), false).is_empty());
    }

    #[test]
    fn test_missing_type() {
        let c = Collection::new("c", "b", 1);
        assert_eq!(messages(&c, false), vec!["Collection type not provided"]);
    }

    #[test]
    fn test_size_bounds() {
        assert!(size_matches_magnitude(5, 0));
        assert!(size_matches_magnitude(5, 1));
        assert!(!size_matches_magnitude(50, 2));
        assert!(size_matches_magnitude(100, 2));
        assert!(size_matches_magnitude(1000, 2));
        assert!(!size_matches_magnitude(1001, 2));
        assert!(!size_matches_magnitude(1, 250));

        let found = messages(&base(3).with_size(20), false);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("size between 1000 and 10000"));
    }

    #[test]
    fn test_large_collections() {
        let found = messages(&base(6), false);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("without subcollections"));
        assert!(found[1].contains("without exact size"));

        assert!(messages(&base(5).with_size(500_000), true).is_empty());
    }

    #[test]
    fn test_materials_and_categories() {
        let c = base(2).with_data_categories([DataCategory::BiologicalSamples]);
        assert_eq!(messages(&c, false).len(), 1);

        let c = base(2).with_materials(["SERUM"]);
        assert!(messages(&c, false)[0].starts_with("Sample types advertised"));

        let c = base(2)
            .with_data_categories([DataCategory::BiologicalSamples])
            .with_materials(["SERUM"]);
        assert!(messages(&c, false).is_empty());
    }

    #[test]
    fn test_medical_records() {
        let c = base(2).with_data_categories([DataCategory::MedicalRecords]);
        assert!(messages(&c, false)[0].starts_with("No diagnoses provided"));

        let c = base(2).with_diagnoses(["urn:miriam:icd:C50"]);
        assert_eq!(
            messages(&c, false),
            vec!["Diagnoses provided but no MEDICAL_RECORDS among its data categories"]
        );
    }

    #[test]
    fn test_imaging() {
        let c = base(2).with_data_categories([DataCategory::ImagingData]);
        let levels: Vec<_> = content_findings(&c, false).into_iter().map(|(l, _)| l).collect();
        assert_eq!(levels, vec![WarningLevel::Error, WarningLevel::Warning]);

        let mut c = base(2);
        c.imaging_modality = vec!["MR".to_string()];
        let found = messages(&c, false);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("image_modality = [\"MR\"]"));
    }
}
