//! Inference pipeline over a question-answering model

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tabular_core::Row;

use crate::error::{Error, Result};
use crate::model::{Device, QuestionAnsweringModel};
use crate::tokenizer::Tokenizer;

/// Tasks a pipeline can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Extractive question answering
    QuestionAnswering,
}

impl Task {
    /// Task identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::QuestionAnswering => "question-answering",
        }
    }
}

impl FromStr for Task {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "question-answering" => Ok(Task::QuestionAnswering),
            other => Err(Error::UnsupportedTask(other.to_string())),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one pipeline call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Answer text, empty when none was found
    pub answer: String,
}

/// Answers questions about a context with a model
#[derive(Debug, Clone)]
pub struct QuestionAnsweringPipeline {
    model: QuestionAnsweringModel,
    tokenizer: Tokenizer,
}

impl QuestionAnsweringPipeline {
    /// Run the model on one context/question pair
    pub fn answer(&self, context: &str, question: &str) -> Answer {
        Answer {
            answer: self.model.predict(question, context),
        }
    }

    /// Run the model on the `context` and `question` fields of a row
    pub fn answer_row(&self, row: &Row) -> Result<Answer> {
        let field = |name: &str| {
            row.get_str(name)
                .ok_or_else(|| Error::MissingField(name.to_string()))
        };
        Ok(self.answer(field("context")?, field("question")?))
    }

    /// Move the underlying model to `device`
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.model = self.model.to(device);
        self
    }

    /// The underlying model
    pub fn model(&self) -> &QuestionAnsweringModel {
        &self.model
    }

    /// The tokenizer
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

/// Build a pipeline for `task`
///
/// Only `"question-answering"` is supported; any other task fails with
/// [`Error::UnsupportedTask`].
pub fn pipeline(task: &str, model: QuestionAnsweringModel, tokenizer: Tokenizer) -> Result<QuestionAnsweringPipeline> {
    match task.parse::<Task>()? {
        Task::QuestionAnswering => Ok(QuestionAnsweringPipeline { model, tokenizer }),
    }
}
