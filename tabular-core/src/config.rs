//! Caller-owned option store
//!
//! Options are plain named values held by whoever constructs them and
//! handed to the components that want them. Nothing in the row store or
//! column frame reads them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Named configuration values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    /// Option values in the order they were first set
    values: IndexMap<String, Value>,
}

impl Options {
    /// Create an empty option store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`Options::set`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an option by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of options set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no option is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut options = Options::new();
        assert!(options.is_empty());

        options.set("display.max_colwidth", 200);
        options.set("display.max_colwidth", Value::Null);
        options.set("mode.chained_assignment", "warn");

        assert_eq!(options.len(), 2);
        assert_eq!(options.get("display.max_colwidth"), Some(&Value::Null));
        assert_eq!(options.get("mode.chained_assignment"), Some(&value!("warn")));
        assert_eq!(options.get("unset"), None);
    }

    #[test]
    fn test_independent_instances() {
        let a = Options::new().with("x", 1);
        let b = Options::new();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
