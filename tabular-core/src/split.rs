//! Named splits of row stores (train, validation, ...)

use std::fmt;

use indexmap::IndexMap;

use crate::error::Result;
use crate::row_store::RowStore;
use crate::transform::{Batch, BatchTransform, RowTransform};
use crate::value::Row;

/// A mapping from split name to [`RowStore`]
///
/// `filter` and `map` transform each split independently and keep the
/// exact set of split names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitCollection {
    /// Splits in insertion order
    splits: IndexMap<String, RowStore>,
}

impl SplitCollection {
    /// Create a new collection from named stores
    pub fn new(splits: IndexMap<String, RowStore>) -> Self {
        Self { splits }
    }

    /// Number of splits
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Check if there are no splits
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Split names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.splits.keys().map(String::as_str)
    }

    /// Get a split by name
    pub fn get(&self, name: &str) -> Option<&RowStore> {
        self.splits.get(name)
    }

    /// Check if a split exists
    pub fn contains(&self, name: &str) -> bool {
        self.splits.contains_key(name)
    }

    /// Iterate over `(name, store)` pairs in order
    pub fn items(&self) -> impl Iterator<Item = (&str, &RowStore)> {
        self.splits.iter().map(|(name, store)| (name.as_str(), store))
    }

    /// Filter every split with the same predicate
    pub fn filter<P>(&self, mut predicate: P) -> SplitCollection
    where
        P: FnMut(&Row) -> bool,
    {
        self.splits
            .iter()
            .map(|(name, store)| (name.clone(), store.filter(&mut predicate)))
            .collect()
    }

    /// Map every split row by row with the same transform
    pub fn map<T>(&self, mut transform: T, remove_columns: &[&str]) -> SplitCollection
    where
        T: RowTransform,
    {
        self.splits
            .iter()
            .map(|(name, store)| {
                let mapped = store.map(|row: &Row| transform.transform(row), remove_columns);
                (name.clone(), mapped)
            })
            .collect()
    }

    /// Map every split as one batch per split
    ///
    /// Each split's batch is built from that split's rows only.
    pub fn map_batched<T>(&self, mut transform: T, remove_columns: &[&str]) -> Result<SplitCollection>
    where
        T: BatchTransform,
    {
        self.splits
            .iter()
            .map(|(name, store)| {
                let mapped = store.map_batched(|batch: Batch| transform.transform(batch), remove_columns)?;
                Ok((name.clone(), mapped))
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, RowStore)> for SplitCollection {
    fn from_iter<I: IntoIterator<Item = (K, RowStore)>>(iter: I) -> Self {
        Self {
            splits: iter.into_iter().map(|(name, store)| (name.into(), store)).collect(),
        }
    }
}

impl IntoIterator for SplitCollection {
    type Item = (String, RowStore);
    type IntoIter = indexmap::map::IntoIter<String, RowStore>;

    fn into_iter(self) -> Self::IntoIter {
        self.splits.into_iter()
    }
}

impl fmt::Display for SplitCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SplitCollection({{")?;
        for (i, (name, store)) in self.splits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {store}")?;
        }
        write!(f, "}})")
    }
}
