//! End-to-end runner: load, preprocess, train, evaluate, benchmark
//!
//! Usage: `tabular-bench [training-args.json]`

use std::{env, fs};

use anyhow::Context;
use tabular_bench::{answerable, evaluate, preprocess_batch, results_frame, run_all, BenchConfig};
use tabular_corpus::load_dataset;
use tabular_qa::{default_data_collator, pipeline, Device, QuestionAnsweringModel, Tokenizer, Trainer, TrainingArguments};
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    let config = BenchConfig::default();

    let level: Level = config
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    let args = match env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            TrainingArguments::from_json(&json)?
        }
        None => TrainingArguments::default(),
    };

    println!("=== Tabular Pipeline ===");

    let raw = load_dataset(&config.dataset)?;
    for (name, store) in raw.items() {
        println!("{name}: {store}");
    }

    let processed = raw
        .filter(answerable)
        .map_batched(preprocess_batch, &["title", "answers"])?;
    let train = processed.get("train").context("corpus has no train split")?;
    let validation = processed.get("validation").context("corpus has no validation split")?;
    info!(columns = ?train.column_names(), "preprocessed corpus");

    let tokenizer = Tokenizer::from_pretrained(config.checkpoint.as_str());
    let model = QuestionAnsweringModel::from_pretrained(config.checkpoint.as_str()).to(Device::Cpu);

    let mut trainer = Trainer::builder(model, args)
        .train_dataset(train.clone())
        .eval_dataset(validation.clone())
        .tokenizer(tokenizer.clone())
        .data_collator(default_data_collator)
        .build()?;
    let output = trainer.train();
    println!("\nTraining: {} ({} rows)", output.status, output.rows_seen);

    let qa = pipeline("question-answering", trainer.into_model(), tokenizer)?;
    let evaluation = evaluate(&qa, validation)?;
    println!(
        "Validation exact match: {}/{} ({:.2}%)",
        evaluation.exact_matches,
        evaluation.total,
        evaluation.accuracy * 100.0
    );

    println!("\n=== Benchmarks ===");
    let results = run_all(&config)?;
    let frame = results_frame(&results)?.sort_values("avg_ms", true)?;
    println!("{frame}");

    Ok(())
}
