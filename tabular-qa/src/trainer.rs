//! Training loop stand-in
//!
//! A [`Trainer`] owns a model and its training rows. `train` passes the rows
//! through the data collator one device batch at a time and fits the model
//! on what comes out.

use serde::{Deserialize, Serialize};
use tabular_core::{Row, RowStore};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::QuestionAnsweringModel;
use crate::tokenizer::Tokenizer;

/// Hyperparameters for a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingArguments {
    /// Directory checkpoints would be written to
    pub output_dir: String,

    /// When to evaluate (`"no"`, `"steps"` or `"epoch"`)
    pub evaluation_strategy: String,

    /// Learning rate
    pub learning_rate: f64,

    /// Training batch size per device
    pub per_device_train_batch_size: usize,

    /// Evaluation batch size per device
    pub per_device_eval_batch_size: usize,

    /// Number of passes over the training rows
    pub num_train_epochs: usize,

    /// Weight decay
    pub weight_decay: f64,

    /// Steps between log lines
    pub logging_steps: usize,

    /// When to save (`"no"`, `"steps"` or `"epoch"`)
    pub save_strategy: String,

    /// Integrations to report to
    pub report_to: Vec<String>,

    /// Random seed
    pub seed: u64,
}

impl Default for TrainingArguments {
    fn default() -> Self {
        Self {
            output_dir: "qa-output".into(),
            evaluation_strategy: "epoch".into(),
            learning_rate: 2e-5,
            per_device_train_batch_size: 16,
            per_device_eval_batch_size: 16,
            num_train_epochs: 1,
            weight_decay: 0.01,
            logging_steps: 50,
            save_strategy: "no".into(),
            report_to: Vec::new(),
            seed: 42,
        }
    }
}

impl TrainingArguments {
    /// Parse arguments from JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let args: Self = serde_json::from_str(json)?;
        args.validate()?;
        Ok(args)
    }

    /// Check that sizes and rates are usable
    pub fn validate(&self) -> Result<()> {
        if self.per_device_train_batch_size == 0 || self.per_device_eval_batch_size == 0 {
            return Err(Error::InvalidArgument("batch sizes must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// Turns a batch of feature rows into model input rows
pub type DataCollator = Box<dyn Fn(Vec<Row>) -> Vec<Row> + Send + Sync>;

/// Collator that returns its features unchanged
pub fn default_data_collator(features: Vec<Row>) -> Vec<Row> {
    features
}

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainOutput {
    /// Always `"trained"` on success
    pub status: String,

    /// Rows the model read
    pub rows_seen: usize,
}

/// A builder for creating trainers
pub struct TrainerBuilder {
    model: QuestionAnsweringModel,
    args: TrainingArguments,
    train_dataset: Option<RowStore>,
    eval_dataset: Option<RowStore>,
    tokenizer: Option<Tokenizer>,
    data_collator: Option<DataCollator>,
}

impl TrainerBuilder {
    /// Create a new trainer builder
    pub fn new(model: QuestionAnsweringModel, args: TrainingArguments) -> Self {
        Self {
            model,
            args,
            train_dataset: None,
            eval_dataset: None,
            tokenizer: None,
            data_collator: None,
        }
    }

    /// Set the training rows
    #[must_use]
    pub fn train_dataset(mut self, dataset: RowStore) -> Self {
        self.train_dataset = Some(dataset);
        self
    }

    /// Set the evaluation rows
    #[must_use]
    pub fn eval_dataset(mut self, dataset: RowStore) -> Self {
        self.eval_dataset = Some(dataset);
        self
    }

    /// Set the tokenizer
    #[must_use]
    pub fn tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Set the data collator
    #[must_use]
    pub fn data_collator<F>(mut self, collator: F) -> Self
    where
        F: Fn(Vec<Row>) -> Vec<Row> + Send + Sync + 'static,
    {
        self.data_collator = Some(Box::new(collator));
        self
    }

    /// Build the trainer
    pub fn build(self) -> Result<Trainer> {
        let train_dataset = self.train_dataset.ok_or_else(|| {
            Error::InvalidArgument("Train dataset is required to build a trainer".into())
        })?;
        self.args.validate()?;

        Ok(Trainer {
            model: self.model,
            args: self.args,
            train_dataset,
            eval_dataset: self.eval_dataset,
            tokenizer: self.tokenizer,
            data_collator: self.data_collator.unwrap_or_else(|| Box::new(default_data_collator)),
        })
    }
}

/// Runs a model over its training rows
pub struct Trainer {
    model: QuestionAnsweringModel,
    args: TrainingArguments,
    train_dataset: RowStore,
    eval_dataset: Option<RowStore>,
    tokenizer: Option<Tokenizer>,
    data_collator: DataCollator,
}

impl Trainer {
    /// Start building a trainer
    pub fn builder(model: QuestionAnsweringModel, args: TrainingArguments) -> TrainerBuilder {
        TrainerBuilder::new(model, args)
    }

    /// Collate the training rows and fit the model on them
    pub fn train(&mut self) -> TrainOutput {
        let batch_size = self.args.per_device_train_batch_size;
        let features: Vec<Row> = self
            .train_dataset
            .rows()
            .chunks(batch_size)
            .flat_map(|chunk| (self.data_collator)(chunk.to_vec()))
            .collect();

        let rows_seen = self.model.fit(&features);
        info!(
            rows_seen,
            batch_size,
            output_dir = %self.args.output_dir,
            "training finished"
        );

        TrainOutput {
            status: "trained".into(),
            rows_seen,
        }
    }

    /// The model being trained
    pub fn model(&self) -> &QuestionAnsweringModel {
        &self.model
    }

    /// Take the model out of the trainer
    pub fn into_model(self) -> QuestionAnsweringModel {
        self.model
    }

    /// Training arguments
    pub fn args(&self) -> &TrainingArguments {
        &self.args
    }

    /// Evaluation rows, if any
    pub fn eval_dataset(&self) -> Option<&RowStore> {
        self.eval_dataset.as_ref()
    }

    /// Tokenizer, if any
    pub fn tokenizer(&self) -> Option<&Tokenizer> {
        self.tokenizer.as_ref()
    }
}
