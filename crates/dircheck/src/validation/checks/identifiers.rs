//! Identifier naming conventions for biobanks, collections, contacts and
//! networks.
//!
//! Ids are `<namespace><NN>_<local part>`, for example
//! `bbmri-eric:ID:CZ_MMCI`. Entities from countries without a national node
//! use `EXT_` in place of the NN. Only `A-Za-z0-9:_-` may appear and no
//! hierarchy component may be empty.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::directory::Directory;
use crate::error::Result;
use crate::validation::warning::{EntityType, Warning, WarningLevel};

use super::{Check, CheckOptions};

const CHECK_NAME: &str = "ValidateIds";

static ILLEGAL_CHARACTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9:_-]").unwrap());

const EXTERNAL: &str = "EXT";

/// Naming scheme of one entity kind.
struct IdScheme {
    label: &'static str,
    namespace: &'static str,
    /// How the entity is described in messages about external ids.
    external_noun: &'static str,
}

const BIOBANK_IDS: IdScheme = IdScheme {
    label: "BiobankID",
    namespace: "bbmri-eric:ID:",
    external_noun: "external biobanks",
};

const COLLECTION_IDS: IdScheme = IdScheme {
    label: "CollectionID",
    namespace: "bbmri-eric:ID:",
    external_noun: "collections from external biobanks",
};

const CONTACT_IDS: IdScheme = IdScheme {
    label: "ContactID",
    namespace: "bbmri-eric:contactID:",
    external_noun: "contacts for external biobanks",
};

const NETWORK_IDS: IdScheme = IdScheme {
    label: "NetworkID",
    namespace: "bbmri-eric:networkID:",
    external_noun: "networks from countries",
};

/// European networks may use `EU_` instead of their NN.
const EUROPEAN: &str = "EU";

type Finding = (WarningLevel, String);

/// Identifier compliance check.
pub struct ValidateIds;

impl Check for ValidateIds {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn evaluate(&self, directory: &Directory, options: &CheckOptions) -> Result<Vec<Warning>> {
        info!("Running identifier validation checks ({})", CHECK_NAME);
        let mut warnings = Vec::new();
        let mut record = |nn: &str, id: &str, entity_type: EntityType, findings: Vec<Finding>| {
            for (level, message) in findings {
                warnings.push(Warning::new(CHECK_NAME, nn, level, id, entity_type, message));
            }
        };

        for biobank in directory.biobanks() {
            let nn = directory.biobank_nn(&biobank.id)?;
            let findings = entity_findings(&BIOBANK_IDS, &biobank.id, nn, options);
            record(nn, &biobank.id, EntityType::Biobank, findings);
        }

        for collection in directory.collections() {
            let nn = directory.collection_nn(&collection.id)?;
            let mut findings = entity_findings(&COLLECTION_IDS, &collection.id, nn, options);
            let expected = format!("{}:collection:", collection.biobank);
            if !collection.id.starts_with(&expected) {
                findings.push((
                    WarningLevel::Warning,
                    format!(
                        "{} does not contain expected biobank prefix (should start with {})",
                        COLLECTION_IDS.label, expected
                    ),
                ));
            }
            record(nn, &collection.id, EntityType::Collection, findings);
        }

        for contact in directory.contacts() {
            let nn = directory.contact_nn(&contact.id)?;
            let findings = entity_findings(&CONTACT_IDS, &contact.id, nn, options);
            record(nn, &contact.id, EntityType::Contact, findings);
        }

        for network in directory.networks() {
            let nn = directory.network_nn(&network.id)?;
            let findings = network_findings(&network.id, nn, options);
            record(nn, &network.id, EntityType::Network, findings);
        }

        Ok(warnings)
    }
}

/// Prefix and character rules shared by biobanks, collections and contacts.
fn entity_findings(scheme: &IdScheme, id: &str, nn: &str, options: &CheckOptions) -> Vec<Finding> {
    let mut findings = Vec::new();
    let external_prefix = format!("{}{}_", scheme.namespace, EXTERNAL);

    if !options.has_national_node(nn) && !id.starts_with(&external_prefix) {
        findings.push(not_compliant(
            scheme,
            &format!(
                "shall start with \"{}\" prefix for {} that have no national node",
                external_prefix, scheme.external_noun
            ),
        ));
    }

    if id.starts_with(&format!("{}{}", scheme.namespace, EXTERNAL)) {
        if !id.starts_with(&external_prefix) {
            findings.push(not_compliant(
                scheme,
                &format!(
                    "shall start with \"{}\" prefix for {}",
                    external_prefix, scheme.external_noun
                ),
            ));
        }
    } else {
        let nn_prefix = format!("{}{}_", scheme.namespace, nn);
        if !id.starts_with(&nn_prefix) {
            findings.push(not_compliant(
                scheme,
                &format!("shall start with \"{}\" prefix", nn_prefix),
            ));
        }
    }

    findings.extend(character_findings(scheme, id));
    findings
}

/// Networks live in their own namespace and may be European-wide.
fn network_findings(id: &str, nn: &str, options: &CheckOptions) -> Vec<Finding> {
    let scheme = &NETWORK_IDS;
    let mut findings = Vec::new();
    let external_prefix = format!("{}{}_", scheme.namespace, EXTERNAL);

    if !options.has_national_node(nn) && !id.starts_with(&external_prefix) {
        findings.push(not_compliant(
            scheme,
            &format!(
                "shall start with \"{}\" prefix for {} that have no national node",
                external_prefix, scheme.external_noun
            ),
        ));
    }

    if !id.starts_with(scheme.namespace) {
        findings.push(not_compliant(
            scheme,
            &format!("shall start with \"{}\" prefix", scheme.namespace),
        ));
    } else {
        let nn_prefix = format!("{}{}_", scheme.namespace, nn);
        let eu_prefix = format!("{}{}_", scheme.namespace, EUROPEAN);
        if !id.starts_with(&nn_prefix)
            && !id.starts_with(&eu_prefix)
            && !id.starts_with(&external_prefix)
        {
            findings.push((
                WarningLevel::Warning,
                format!(
                    "{} has suspicious country affiliation (should start with \"{}\" or \"{}\" \
                     prefix)",
                    scheme.label, nn_prefix, eu_prefix
                ),
            ));
        }
    }

    findings.extend(character_findings(scheme, id));
    findings
}

fn character_findings(scheme: &IdScheme, id: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    if ILLEGAL_CHARACTERS.is_match(id) {
        findings.push((
            WarningLevel::Error,
            format!(
                "{} contains illegal characters (shall be \"A-Za-z0-9:_-\")",
                scheme.label
            ),
        ));
    }
    if id.contains("::") {
        findings.push((
            WarningLevel::Error,
            format!(
                "{} contains :: indicating empty component in ID hierarchy",
                scheme.label
            ),
        ));
    }
    findings
}

fn not_compliant(scheme: &IdScheme, requirement: &str) -> Finding {
    (
        WarningLevel::Error,
        format!(
            "{} is not compliant with the ID naming convention ({})",
            scheme.label, requirement
        ),
    )
}
