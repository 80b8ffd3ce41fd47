//! Factory pattern for building corpora by identifier

use tabular_core::{Row, RowStore, SplitCollection};
use tracing::info;

use crate::error::{Error, Result};
use crate::squad::SquadFactory;

/// Layout of one split: how many rows, starting at which id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSpec {
    /// Split name
    pub name: String,

    /// Number of rows in the split
    pub size: usize,

    /// Id of the first row
    pub offset: usize,
}

impl SplitSpec {
    /// Create a new split layout
    pub fn new(name: impl Into<String>, size: usize, offset: usize) -> Self {
        Self {
            name: name.into(),
            size,
            offset,
        }
    }
}

/// A factory for one named corpus
pub trait DatasetFactory: Send + Sync {
    /// Identifier the corpus is loaded by
    fn name(&self) -> &str;

    /// Splits to build, in order
    fn split_specs(&self) -> Vec<SplitSpec>;

    /// Build the row with the given id
    fn row(&self, id: usize) -> Row;

    /// Build every split
    ///
    /// Fails if a split's id range runs past `usize::MAX`.
    fn build(&self) -> Result<SplitCollection> {
        self.split_specs()
            .into_iter()
            .map(|spec| -> Result<(String, RowStore)> {
                let end = spec.offset.checked_add(spec.size).ok_or_else(|| {
                    tabular_core::Error::InvalidArgument(format!(
                        "split '{}' ids overflow: offset {} + size {}",
                        spec.name, spec.offset, spec.size
                    ))
                })?;
                let store: RowStore = (spec.offset..end).map(|id| self.row(id)).collect();
                info!(dataset = self.name(), split = %spec.name, rows = store.len(), "built split");
                Ok((spec.name, store))
            })
            .collect()
    }
}

/// Resolves corpus identifiers to factories
pub struct DatasetRegistry {
    /// Registered factories
    factories: Vec<Box<dyn DatasetFactory>>,
}

impl DatasetRegistry {
    /// Create a registry with no factories
    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Register a factory, replacing any with the same name
    pub fn register(&mut self, factory: Box<dyn DatasetFactory>) {
        self.factories.retain(|existing| existing.name() != factory.name());
        self.factories.push(factory);
    }

    /// Names of the registered corpora
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|factory| factory.name()).collect()
    }

    /// Look up a factory by name
    pub fn get(&self, name: &str) -> Option<&dyn DatasetFactory> {
        self.factories
            .iter()
            .find(|factory| factory.name() == name)
            .map(|factory| factory.as_ref())
    }

    /// Build the named corpus
    pub fn load(&self, name: &str) -> Result<SplitCollection> {
        let factory = self
            .get(name)
            .ok_or_else(|| Error::UnsupportedDataset(name.to_string()))?;
        factory.build()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SquadFactory));
        registry
    }
}

/// Build a corpus by identifier from the default registry
///
/// Only `"squad"` is known; anything else fails with
/// [`Error::UnsupportedDataset`].
pub fn load_dataset(name: &str) -> Result<SplitCollection> {
    DatasetRegistry::default().load(name)
}
