//! Directory entities as they appear in a snapshot.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DircheckError, Result};

/// Collection type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionType {
    BirthCohort,
    CaseControl,
    Cohort,
    CrossSectional,
    DiseaseSpecific,
    Hospital,
    Image,
    Longitudinal,
    NonHuman,
    Other,
    PopulationBased,
    ProspectiveCollection,
    QualityControl,
    /// Rare disease collection.
    Rd,
    Sample,
    TwinStudy,
}

impl CollectionType {
    /// Types whose collections are expected to declare diagnoses.
    pub const CLINICAL: [CollectionType; 3] = [
        CollectionType::Hospital,
        CollectionType::DiseaseSpecific,
        CollectionType::Rd,
    ];

    /// Whether this type describes a clinical collection.
    pub fn is_clinical(&self) -> bool {
        Self::CLINICAL.contains(self)
    }
}

/// Data category vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataCategory {
    BiologicalSamples,
    GenealogicalRecords,
    ImagingData,
    MedicalRecords,
    NationalRegistries,
    Other,
    PhysiologicalBiochemicalMeasurements,
    SurveyData,
    /// Not available.
    #[serde(rename = "NAV")]
    NotAvailable,
}

/// A biobank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biobank {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// National node code of the hosting country.
    pub country: String,
}

/// A sample or data collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Id of the owning biobank.
    pub biobank: String,
    /// Id of the parent collection for subcollections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_collection: Option<String>,
    /// Scale bucket: the collection holds between 10^n and 10^(n+1) items.
    pub order_of_magnitude: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "type", default)]
    pub collection_type: Vec<CollectionType>,
    #[serde(default)]
    pub data_categories: Vec<DataCategory>,
    #[serde(default)]
    pub diagnosis_available: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub imaging_modality: Vec<String>,
    #[serde(default)]
    pub image_dataset_type: Vec<String>,
}

impl Collection {
    /// Create a collection with empty vocabularies.
    pub fn new(id: impl Into<String>, biobank: impl Into<String>, order_of_magnitude: u8) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            biobank: biobank.into(),
            parent_collection: None,
            order_of_magnitude,
            size: None,
            collection_type: Vec::new(),
            data_categories: Vec::new(),
            diagnosis_available: Vec::new(),
            materials: Vec::new(),
            imaging_modality: Vec::new(),
            image_dataset_type: Vec::new(),
        }
    }

    /// Set the collection types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = CollectionType>) -> Self {
        self.collection_type = types.into_iter().collect();
        self
    }

    /// Set the data categories.
    pub fn with_data_categories(
        mut self,
        categories: impl IntoIterator<Item = DataCategory>,
    ) -> Self {
        self.data_categories = categories.into_iter().collect();
        self
    }

    /// Set the declared diagnoses.
    pub fn with_diagnoses<S: Into<String>>(mut self, diagnoses: impl IntoIterator<Item = S>) -> Self {
        self.diagnosis_available = diagnoses.into_iter().map(Into::into).collect();
        self
    }

    /// Set the material types.
    pub fn with_materials<S: Into<String>>(mut self, materials: impl IntoIterator<Item = S>) -> Self {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exact size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the parent collection.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_collection = Some(parent.into());
        self
    }

    /// Whether the collection has the given type.
    pub fn has_type(&self, collection_type: CollectionType) -> bool {
        self.collection_type.contains(&collection_type)
    }

    /// Whether any of the collection's types is clinical.
    pub fn is_clinical(&self) -> bool {
        self.collection_type.iter().any(CollectionType::is_clinical)
    }

    /// Whether the collection has the given data category.
    pub fn has_data_category(&self, category: DataCategory) -> bool {
        self.data_categories.contains(&category)
    }
}

/// A contact person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub country: String,
}

/// A network of biobanks or collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub country: String,
}

/// Full content of the directory at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub biobanks: Vec<Biobank>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub networks: Vec<Network>,
}

impl DirectorySnapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DircheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        Ok(snapshot)
    }
}
