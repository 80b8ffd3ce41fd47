//! Question-answering model stand-in

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tabular_core::{Options, Row};
use tracing::{debug, info};

use crate::error::{Error, Result};

static COUNTRY_RE: OnceLock<Regex> = OnceLock::new();

/// Where a model runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    /// Host CPU
    #[default]
    Cpu,

    /// CUDA device with the given ordinal
    Cuda(usize),
}

impl FromStr for Device {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda(0)),
            other => other
                .strip_prefix("cuda:")
                .and_then(|ordinal| ordinal.parse().ok())
                .map(Device::Cuda)
                .ok_or_else(|| Error::InvalidArgument(format!("unknown device '{other}'"))),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

/// Extractive question-answering model
///
/// `predict` looks up the number after `Country ` in the question and
/// answers `City <n>` when the context mentions that city.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionAnsweringModel {
    name: String,
    trained: bool,
    device: Device,
    config: Options,
}

impl QuestionAnsweringModel {
    /// Load a model by checkpoint name
    pub fn from_pretrained(name: impl Into<String>) -> Self {
        let name = name.into();
        let config = Options::new().with("name", name.as_str());
        Self {
            name,
            trained: false,
            device: Device::Cpu,
            config,
        }
    }

    /// Checkpoint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether [`fit`](Self::fit) has run
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Current device
    pub fn device(&self) -> Device {
        self.device
    }

    /// Model configuration
    pub fn config(&self) -> &Options {
        &self.config
    }

    /// Move the model to `device`
    #[must_use]
    pub fn to(mut self, device: Device) -> Self {
        debug!(model = %self.name, %device, "moving model");
        self.device = device;
        self
    }

    /// Fit on `rows`, reading each row once; returns the number of rows read
    pub fn fit<'a, I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let rows_seen = rows.into_iter().count();
        self.trained = true;

        info!(model = %self.name, rows_seen, "fitted model");
        rows_seen
    }

    /// Answer `question` from `context`, or return an empty string
    pub fn predict(&self, question: &str, context: &str) -> String {
        let regex = COUNTRY_RE.get_or_init(|| Regex::new(r"Country (\d+)").expect("valid regex"));

        regex
            .captures(question)
            .map(|captures| format!("City {}", &captures[1]))
            .filter(|candidate| context.contains(candidate.as_str()))
            .unwrap_or_default()
    }
}
