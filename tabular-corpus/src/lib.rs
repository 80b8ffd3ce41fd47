//! Synthetic corpora for the tabular engine
//!
//! Corpora are pure functions of their identifier: building the same one
//! twice yields identical rows. [`load_dataset`] resolves an identifier
//! through the default [`DatasetRegistry`].

mod error;
mod factory;
pub mod squad;

pub use error::{Error, Result};
pub use factory::{load_dataset, DatasetFactory, DatasetRegistry, SplitSpec};
pub use squad::SquadFactory;
