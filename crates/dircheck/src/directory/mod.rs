//! Read-only access to directory content.
//!
//! A [`Directory`] wraps a [`DirectorySnapshot`], indexes its entities by id
//! and resolves the national node (NN) each entity belongs to. Referential
//! integrity is verified once at construction so the checks can rely on it.
//!
//! # Example
//!
//! ```
//! use dircheck::directory::{Biobank, Collection, Directory, DirectorySnapshot};
//!
//! let snapshot = DirectorySnapshot {
//!     biobanks: vec![Biobank {
//!         id: "bbmri-eric:ID:CZ_MMCI".into(),
//!         name: "MMCI".into(),
//!         country: "CZ".into(),
//!     }],
//!     collections: vec![Collection::new(
//!         "bbmri-eric:ID:CZ_MMCI:collection:LTS",
//!         "bbmri-eric:ID:CZ_MMCI",
//!         3,
//!     )],
//!     ..Default::default()
//! };
//! let directory = Directory::new(snapshot).unwrap();
//! assert_eq!(
//!     directory.collection_nn("bbmri-eric:ID:CZ_MMCI:collection:LTS").unwrap(),
//!     "CZ"
//! );
//! ```

mod model;

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;

use crate::coding::OrphaMapper;
use crate::error::{DircheckError, Result};

pub use model::{
    Biobank, Collection, CollectionType, Contact, DataCategory, DirectorySnapshot, Network,
};

/// Indexed, read-only view of a directory snapshot.
pub struct Directory {
    snapshot: DirectorySnapshot,
    biobanks_by_id: HashMap<String, usize>,
    collections_by_id: HashMap<String, usize>,
    contacts_by_id: HashMap<String, usize>,
    networks_by_id: HashMap<String, usize>,
    /// Direct subcollections, by parent id.
    children: HashMap<String, Vec<usize>>,
    orpha_mapper: Option<Arc<dyn OrphaMapper>>,
}

impl Directory {
    /// Index a snapshot.
    ///
    /// Fails when ids repeat or when a collection refers to a biobank or
    /// parent collection that is not part of the snapshot.
    pub fn new(snapshot: DirectorySnapshot) -> Result<Self> {
        let biobanks_by_id = index_ids("biobank", snapshot.biobanks.iter().map(|b| &b.id))?;
        let collections_by_id =
            index_ids("collection", snapshot.collections.iter().map(|c| &c.id))?;
        let contacts_by_id = index_ids("contact", snapshot.contacts.iter().map(|c| &c.id))?;
        let networks_by_id = index_ids("network", snapshot.networks.iter().map(|n| &n.id))?;

        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, collection) in snapshot.collections.iter().enumerate() {
            if !biobanks_by_id.contains_key(&collection.biobank) {
                return Err(DircheckError::BrokenReference {
                    kind: "collection",
                    id: collection.id.clone(),
                    target: collection.biobank.clone(),
                });
            }
            if let Some(parent) = &collection.parent_collection {
                if !collections_by_id.contains_key(parent) {
                    return Err(DircheckError::BrokenReference {
                        kind: "collection",
                        id: collection.id.clone(),
                        target: parent.clone(),
                    });
                }
                children.entry(parent.clone()).or_default().push(idx);
            }
        }
        check_acyclic(&snapshot.collections, &collections_by_id)?;

        Ok(Self {
            snapshot,
            biobanks_by_id,
            collections_by_id,
            contacts_by_id,
            networks_by_id,
            children,
            orpha_mapper: None,
        })
    }

    /// Load and index a JSON snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(DirectorySnapshot::from_file(path)?)
    }

    /// Attach an ORPHA mapper.
    pub fn with_orpha_mapper(mut self, mapper: Arc<dyn OrphaMapper>) -> Self {
        self.orpha_mapper = Some(mapper);
        self
    }

    /// Whether an ORPHA mapper is configured.
    pub fn has_orpha_mapper(&self) -> bool {
        self.orpha_mapper.is_some()
    }

    /// The configured ORPHA mapper, if any.
    pub fn orpha_mapper(&self) -> Option<&dyn OrphaMapper> {
        self.orpha_mapper.as_deref()
    }

    /// The underlying snapshot.
    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    pub fn biobanks(&self) -> &[Biobank] {
        &self.snapshot.biobanks
    }

    pub fn collections(&self) -> &[Collection] {
        &self.snapshot.collections
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.snapshot.contacts
    }

    pub fn networks(&self) -> &[Network] {
        &self.snapshot.networks
    }

    /// Look up a biobank by id.
    pub fn biobank(&self, id: &str) -> Option<&Biobank> {
        self.biobanks_by_id
            .get(id)
            .map(|&idx| &self.snapshot.biobanks[idx])
    }

    /// Look up a collection by id.
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections_by_id
            .get(id)
            .map(|&idx| &self.snapshot.collections[idx])
    }

    /// National node of a biobank.
    pub fn biobank_nn(&self, id: &str) -> Result<&str> {
        self.biobank(id)
            .map(|b| b.country.as_str())
            .ok_or_else(|| unknown("biobank", id))
    }

    /// National node of a collection: the node of its owning biobank.
    pub fn collection_nn(&self, id: &str) -> Result<&str> {
        let collection = self.collection(id).ok_or_else(|| unknown("collection", id))?;
        self.biobank_nn(&collection.biobank)
    }

    /// National node of a contact.
    pub fn contact_nn(&self, id: &str) -> Result<&str> {
        self.contacts_by_id
            .get(id)
            .map(|&idx| self.snapshot.contacts[idx].country.as_str())
            .ok_or_else(|| unknown("contact", id))
    }

    /// National node of a network.
    pub fn network_nn(&self, id: &str) -> Result<&str> {
        self.networks_by_id
            .get(id)
            .map(|&idx| self.snapshot.networks[idx].country.as_str())
            .ok_or_else(|| unknown("network", id))
    }

    /// All transitive subcollections of a collection, breadth first.
    pub fn collection_descendants(&self, id: &str) -> Result<Vec<&Collection>> {
        if !self.collections_by_id.contains_key(id) {
            return Err(unknown("collection", id));
        }

        let mut descendants = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);
        while let Some(parent) = queue.pop_front() {
            for &idx in self.children.get(parent).into_iter().flatten() {
                let child = &self.snapshot.collections[idx];
                descendants.push(child);
                queue.push_back(&child.id);
            }
        }
        Ok(descendants)
    }
}

fn index_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (idx, id) in ids.enumerate() {
        if index.insert(id.clone(), idx).is_some() {
            return Err(DircheckError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(index)
}

/// Walk every parent chain; a chain longer than the collection count loops.
fn check_acyclic(collections: &[Collection], by_id: &HashMap<String, usize>) -> Result<()> {
    for collection in collections {
        let mut current = collection;
        let mut steps = 0;
        while let Some(parent) = &current.parent_collection {
            steps += 1;
            if steps > collections.len() {
                return Err(DircheckError::CyclicHierarchy {
                    id: collection.id.clone(),
                });
            }
            match by_id.get(parent) {
                Some(&idx) => current = &collections[idx],
                None => break,
            }
        }
    }
    Ok(())
}

fn unknown(kind: &'static str, id: &str) -> DircheckError {
    DircheckError::UnknownEntity {
        kind,
        id: id.to_string(),
    }
}
