//! Directory checks.
//!
//! Every check implements [`Check`] and is registered in [`all_checks`].
//! The list is fixed at compile time and runs in the order given there.

mod collection_coding;
mod collection_content;
mod identifiers;

use indexmap::IndexMap;

use crate::directory::Directory;
use crate::error::Result;

use super::warning::Warning;

pub use collection_coding::{CollectionCoding, validate_collection_coding};
pub use collection_content::CollectionContent;
pub use identifiers::ValidateIds;

/// National nodes known to the directory, with their contact e-mails.
pub type NationalNodes = IndexMap<String, Vec<String>>;

/// Options threaded into every check run.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Entities whose NN is not listed here are treated as external.
    pub national_nodes: NationalNodes,
}

impl CheckOptions {
    pub fn new(national_nodes: NationalNodes) -> Self {
        Self { national_nodes }
    }

    /// Whether the NN has a national node.
    pub fn has_national_node(&self, nn: &str) -> bool {
        self.national_nodes.contains_key(nn)
    }
}

/// A rule set evaluated against the whole directory.
pub trait Check: Send + Sync {
    /// Name recorded on every warning this check emits.
    fn name(&self) -> &'static str;

    /// Evaluate the check.
    ///
    /// Findings are returned as warnings; errors are reserved for broken
    /// directory contracts.
    fn evaluate(&self, directory: &Directory, options: &CheckOptions) -> Result<Vec<Warning>>;
}

/// Every check, in execution order.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(ValidateIds),
        Box::new(CollectionContent),
        Box::new(CollectionCoding),
    ]
}
