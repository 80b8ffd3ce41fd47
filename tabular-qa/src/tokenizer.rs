//! Pretrained tokenizer handle

use serde::{Deserialize, Serialize};

/// Which side sequences are padded on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingSide {
    /// Pad before the sequence
    Left,

    /// Pad after the sequence
    #[default]
    Right,
}

/// A tokenizer identified by checkpoint name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer {
    /// Checkpoint name
    name: String,

    /// Padding side
    pub padding_side: PaddingSide,
}

impl Tokenizer {
    /// Load a tokenizer by checkpoint name
    pub fn from_pretrained(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            padding_side: PaddingSide::default(),
        }
    }

    /// Checkpoint name
    pub fn name(&self) -> &str {
        &self.name
    }
}
