//! Synthetic reading-comprehension corpus
//!
//! Each row pairs a one-sentence context naming a capital city with the
//! question asking for it. Train ids start at 0 and validation ids at
//! 10000, so the splits never share an id.

use tabular_core::{row, Row, RowStore, Value};

use crate::factory::{DatasetFactory, SplitSpec};

/// Number of training rows
pub const TRAIN_SIZE: usize = 3466;

/// Number of validation rows
pub const VALIDATION_SIZE: usize = 345;

/// Id of the first validation row
pub const VALIDATION_OFFSET: usize = 10_000;

/// Factory for the `squad` corpus
#[derive(Debug, Clone, Copy, Default)]
pub struct SquadFactory;

impl DatasetFactory for SquadFactory {
    fn name(&self) -> &str {
        "squad"
    }

    fn split_specs(&self) -> Vec<SplitSpec> {
        vec![
            SplitSpec::new("train", TRAIN_SIZE, 0),
            SplitSpec::new("validation", VALIDATION_SIZE, VALIDATION_OFFSET),
        ]
    }

    fn row(&self, id: usize) -> Row {
        squad_row(id)
    }
}

/// Build the row for one id
///
/// `answers.answer_start` is the character offset of the answer inside
/// `context`.
pub fn squad_row(id: usize) -> Row {
    let city = format!("City {id}");
    let country = format!("Country {id}");
    let context = format!(
        "{country} has its capital in {city}. \
         {city} is internationally recognised for its cultural heritage and innovation hubs."
    );
    let question = format!("What is the capital of {country}?");
    let answer_start = context
        .find(&city)
        .map_or(0, |byte| context[..byte].chars().count());

    let answers: Row = [
        ("text", Value::from(vec![city])),
        ("answer_start", Value::from(vec![answer_start])),
    ]
    .into_iter()
    .collect();

    row! {
        "id" => id.to_string(),
        "title" => country,
        "context" => context,
        "question" => question,
        "answers" => answers,
    }
}

/// Build `size` consecutive rows starting at id `offset`
pub fn build_split(size: usize, offset: usize) -> RowStore {
    (offset..offset + size).map(squad_row).collect()
}
