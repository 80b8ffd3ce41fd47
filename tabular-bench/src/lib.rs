//! Benchmarks for the tabular engine
//!
//! The timing harness runs a closure a configured number of times after a
//! warmup and reports per-iteration statistics. The preprocessing helpers
//! here are the ones the runner pushes the corpus through before training.

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tabular_core::{Batch, ColumnFrame, Row, RowStore, SplitCollection, Value};
use tabular_corpus::load_dataset;
use tabular_qa::QuestionAnsweringPipeline;
use tracing::debug;

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of timed iterations
    pub iterations: usize,

    /// Untimed iterations run first
    pub warmup_iterations: usize,

    /// Corpus identifier to load
    pub dataset: String,

    /// Checkpoint name for the tokenizer and model
    pub checkpoint: String,

    /// Maximum log level for the runner
    pub log_level: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            warmup_iterations: 2,
            dataset: "squad".into(),
            checkpoint: "distilbert-base-uncased".into(),
            log_level: "info".into(),
        }
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchResult {
    /// Name of the benchmark
    pub name: String,

    /// Total time taken
    pub total_time: Duration,

    /// Average time per iteration
    pub avg_time: Duration,

    /// Min time per iteration
    pub min_time: Duration,

    /// Max time per iteration
    pub max_time: Duration,

    /// Rows processed per iteration
    pub rows: usize,

    /// Throughput (rows/second)
    pub throughput: f64,
}

/// Run a benchmark
///
/// `func` returns the number of rows it processed.
#[allow(clippy::cast_precision_loss)]
pub fn run_benchmark<F>(name: &str, config: &BenchConfig, mut func: F) -> anyhow::Result<BenchResult>
where
    F: FnMut() -> anyhow::Result<usize>,
{
    if config.iterations == 0 {
        bail!("benchmark '{name}' needs at least one iteration");
    }

    for _ in 0..config.warmup_iterations {
        func()?;
    }

    let mut times = Vec::with_capacity(config.iterations);
    let mut rows = 0;
    let start_total = Instant::now();

    for _ in 0..config.iterations {
        let start = Instant::now();
        rows = func()?;
        times.push(start.elapsed());
    }

    let total_time = start_total.elapsed();

    let avg_time = times.iter().sum::<Duration>() / u32::try_from(times.len())?;
    let min_time = times.iter().min().copied().unwrap_or_default();
    let max_time = times.iter().max().copied().unwrap_or_default();

    let seconds = total_time.as_secs_f64();
    let throughput = if seconds > 0.0 {
        (rows * config.iterations) as f64 / seconds
    } else {
        0.0
    };

    debug!(name, ?avg_time, rows, "benchmark finished");
    Ok(BenchResult {
        name: name.to_string(),
        total_time,
        avg_time,
        min_time,
        max_time,
        rows,
        throughput,
    })
}

/// First answer text of a row
///
/// Reads the flattened `answer_text` field when present, otherwise the
/// first entry of `answers.text`.
pub fn answer_text(row: &Row) -> Option<&str> {
    row.get_str("answer_text").or_else(|| {
        row.get("answers")
            .and_then(Value::as_map)
            .and_then(|answers| answers.get("text"))
            .and_then(Value::as_list)
            .and_then(|texts| texts.first())
            .and_then(Value::as_str)
    })
}

/// Keep rows whose answer occurs in their context
pub fn answerable(row: &Row) -> bool {
    match (answer_text(row), row.get_str("context")) {
        (Some(answer), Some(context)) => context.contains(answer),
        _ => false,
    }
}

/// Copy a row and add its answer as a flat `answer_text` field
pub fn flatten_answer(row: &Row) -> Row {
    let mut out = row.clone();
    out.insert("answer_text", answer_text(row).map(str::to_string));
    out
}

/// Batched preprocessing: trims questions and flattens answers
///
/// The input columns are kept; `answer_text` and `answer_start` are added.
pub fn preprocess_batch(mut batch: Batch) -> Batch {
    if let Some(questions) = batch.get_mut("question") {
        for question in questions.iter_mut() {
            if let Some(trimmed) = question.as_str().map(|text| text.trim().to_string()) {
                *question = Value::from(trimmed);
            }
        }
    }

    let answers = batch.get("answers").cloned().unwrap_or_default();
    let (texts, starts): (Vec<Value>, Vec<Value>) = answers
        .iter()
        .map(|record| {
            let first = |key: &str| {
                record
                    .as_map()
                    .and_then(|map| map.get(key))
                    .and_then(Value::as_list)
                    .and_then(|values| values.first())
                    .cloned()
                    .unwrap_or_default()
            };
            (first("text"), first("answer_start"))
        })
        .unzip();

    if !answers.is_empty() {
        batch.insert("answer_text".into(), texts);
        batch.insert("answer_start".into(), starts);
    }
    batch
}

/// Exact-match evaluation summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Rows evaluated
    pub total: usize,

    /// Rows answered exactly
    pub exact_matches: usize,

    /// `exact_matches / total`, or 0 with no rows
    pub accuracy: f64,
}

/// Score a pipeline by exact match against each row's answer
#[allow(clippy::cast_precision_loss)]
pub fn evaluate(pipeline: &QuestionAnsweringPipeline, rows: &RowStore) -> anyhow::Result<Evaluation> {
    let mut exact_matches = 0;

    for (i, row) in rows.iter().enumerate() {
        let expected = answer_text(row).with_context(|| format!("row {i} has no answer"))?;
        if pipeline.answer_row(row)?.answer == expected {
            exact_matches += 1;
        }
    }

    let total = rows.len();
    let accuracy = if total == 0 {
        0.0
    } else {
        exact_matches as f64 / total as f64
    };

    Ok(Evaluation {
        total,
        exact_matches,
        accuracy,
    })
}

/// Total rows across all splits
pub fn total_rows(splits: &SplitCollection) -> usize {
    splits.items().map(|(_, store)| store.len()).sum()
}

/// Benchmark building the configured corpus
pub fn bench_corpus_build(config: &BenchConfig) -> anyhow::Result<BenchResult> {
    run_benchmark("corpus build", config, || {
        Ok(total_rows(&load_dataset(&config.dataset)?))
    })
}

/// Benchmark filtering every split
pub fn bench_filter(config: &BenchConfig, splits: &SplitCollection) -> anyhow::Result<BenchResult> {
    run_benchmark("filter", config, || Ok(total_rows(&splits.filter(answerable))))
}

/// Benchmark a row-wise map over every split
pub fn bench_map(config: &BenchConfig, splits: &SplitCollection) -> anyhow::Result<BenchResult> {
    run_benchmark("map", config, || Ok(total_rows(&splits.map(flatten_answer, &["answers"]))))
}

/// Benchmark a batched map over every split
pub fn bench_map_batched(config: &BenchConfig, splits: &SplitCollection) -> anyhow::Result<BenchResult> {
    run_benchmark("map batched", config, || {
        Ok(total_rows(&splits.map_batched(preprocess_batch, &["title", "answers"])?))
    })
}

/// Run every benchmark against one freshly loaded corpus
pub fn run_all(config: &BenchConfig) -> anyhow::Result<Vec<BenchResult>> {
    let splits = load_dataset(&config.dataset).context("loading benchmark corpus")?;

    Ok(vec![
        bench_corpus_build(config)?,
        bench_filter(config, &splits)?,
        bench_map(config, &splits)?,
        bench_map_batched(config, &splits)?,
    ])
}

/// Tabulate results, one record per benchmark
///
/// Times are reported in milliseconds.
pub fn results_frame(results: &[BenchResult]) -> anyhow::Result<ColumnFrame> {
    let millis = |pick: fn(&BenchResult) -> Duration| -> Vec<Value> {
        results
            .iter()
            .map(|result| Value::Float(pick(result).as_secs_f64() * 1000.0))
            .collect()
    };

    let frame = ColumnFrame::from_columns([
        ("name", results.iter().map(|r| Value::from(&r.name)).collect::<Vec<_>>()),
        ("avg_ms", millis(|r| r.avg_time)),
        ("min_ms", millis(|r| r.min_time)),
        ("max_ms", millis(|r| r.max_time)),
        ("rows", results.iter().map(|r| Value::from(r.rows)).collect()),
        ("rows_per_sec", results.iter().map(|r| Value::Float(r.throughput.round())).collect()),
    ])?;

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabular_core::row;
    use tabular_corpus::squad::{build_split, squad_row};
    use tabular_qa::{pipeline, QuestionAnsweringModel, Tokenizer};

    fn quick() -> BenchConfig {
        BenchConfig {
            iterations: 2,
            warmup_iterations: 0,
            ..BenchConfig::default()
        }
    }

    fn qa() -> QuestionAnsweringPipeline {
        pipeline(
            "question-answering",
            QuestionAnsweringModel::from_pretrained("m"),
            Tokenizer::from_pretrained("m"),
        )
        .unwrap()
    }

    #[test]
    fn test_run_benchmark_counts_calls() {
        let mut calls = 0;
        let config = BenchConfig {
            iterations: 3,
            warmup_iterations: 2,
            ..BenchConfig::default()
        };

        let result = run_benchmark("count", &config, || {
            calls += 1;
            Ok(7)
        })
        .unwrap();

        assert_eq!(calls, 5);
        assert_eq!(result.rows, 7);
        assert!(result.min_time <= result.avg_time && result.avg_time <= result.max_time);
    }

    #[test]
    fn test_run_benchmark_rejects_zero_iterations() {
        let config = BenchConfig {
            iterations: 0,
            ..BenchConfig::default()
        };
        assert!(run_benchmark("none", &config, || Ok(0)).is_err());
    }

    #[test]
    fn test_answer_helpers() {
        let row = squad_row(3);
        assert_eq!(answer_text(&row), Some("City 3"));
        assert!(answerable(&row));
        assert!(!answerable(&row! { "context" => "nothing here" }));

        let flat = flatten_answer(&row);
        assert_eq!(flat.get_str("answer_text"), Some("City 3"));
        assert!(row.get("answer_text").is_none());
    }

    #[test]
    fn test_preprocess_batch_via_map_batched() {
        let store = build_split(4, 0);
        let processed = store.map_batched(preprocess_batch, &["title", "answers"]).unwrap();

        assert_eq!(processed.len(), 4);
        assert_eq!(
            processed.column_names(),
            ["id", "context", "question", "answer_text", "answer_start"]
        );
        assert_eq!(processed.get(2).unwrap().get_str("answer_text"), Some("City 2"));
        assert_eq!(processed.get(2).unwrap().get("answer_start"), Some(&Value::Int(29)));
    }

    #[test]
    fn test_evaluate_exact_match() {
        let mut rows: Vec<Row> = (0..3).map(squad_row).collect();
        rows.push(row! {
            "context" => "Nothing relevant.",
            "question" => "What is the capital of Country 9?",
            "answer_text" => "City 9",
        });

        let evaluation = evaluate(&qa(), &RowStore::new(rows)).unwrap();
        assert_eq!(evaluation.total, 4);
        assert_eq!(evaluation.exact_matches, 3);
        assert!((evaluation.accuracy - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_evaluate_empty() {
        let evaluation = evaluate(&qa(), &RowStore::empty()).unwrap();
        assert_eq!(evaluation.total, 0);
        assert!(evaluation.accuracy.abs() < f64::EPSILON);
    }

    #[test]
    fn test_results_frame() {
        let splits = load_dataset("squad").unwrap();
        let results = vec![
            bench_filter(&quick(), &splits).unwrap(),
            bench_map(&quick(), &splits).unwrap(),
        ];

        let frame = results_frame(&results).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.columns(), ["name", "avg_ms", "min_ms", "max_ms", "rows", "rows_per_sec"]);
        assert_eq!(
            frame.select_one("rows").unwrap().sum().unwrap(),
            Value::from(2 * total_rows(&splits))
        );
        assert!(frame.sort_values("avg_ms", true).is_ok());
    }
}
