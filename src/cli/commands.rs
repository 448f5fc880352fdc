//! Command implementations for the Kentron CLI.

use std::fs;
use std::time::Instant;

use crate::analysis::extractor::UnicodeTermExtractor;
use crate::classification::RocchioClassifier;
use crate::cli::args::{ClassifyArgs, Command, EvaluateArgs, KentronArgs, TrainingOpts};
use crate::cli::output::{
    ClassificationOutput, ClassifyRunOutput, EvaluationOutput, output_result,
};
use crate::document::{Document, load_corpus_flat, load_corpus_from_subdirs};
use crate::error::{KentronError, Result};
use crate::evaluation::{evaluate, split_dataset};
use crate::parallel_extraction::ParallelExtractor;

/// Execute a CLI command.
pub fn execute_command(args: KentronArgs) -> Result<()> {
    match &args.command {
        Command::Evaluate(eval_args) => run_evaluate(eval_args.clone(), &args),
        Command::Classify(classify_args) => run_classify(classify_args.clone(), &args),
    }
}

/// Load a corpus and run term extraction over it.
fn load_and_extract(opts: &TrainingOpts, cli_args: &KentronArgs) -> Result<Vec<Document>> {
    if cli_args.verbosity() > 1 {
        println!("Loading corpus from: {}", opts.corpus_dir.display());
    }

    let documents = if opts.flat_layout {
        load_corpus_flat(&opts.corpus_dir)?
    } else {
        load_corpus_from_subdirs(&opts.corpus_dir)?
    };
    if documents.is_empty() {
        return Err(KentronError::empty_corpus(format!(
            "no documents found under '{}'",
            opts.corpus_dir.display()
        )));
    }

    let extractor = UnicodeTermExtractor::new();
    let pool = ParallelExtractor::new(&opts.extraction_config())?;
    pool.extract_corpus(&extractor, documents)
}

/// Train on a held-out split and report accuracy.
fn run_evaluate(args: EvaluateArgs, cli_args: &KentronArgs) -> Result<()> {
    let start = Instant::now();

    let documents = load_and_extract(&args.training, cli_args)?;
    let corpus_documents = documents.len();

    let split = split_dataset(documents, &args.split_config())?;
    let classifier = RocchioClassifier::train(&split.training, &args.training.train_config())?;
    let report = evaluate(&classifier, &split.test)?;

    let stats = classifier.stats();
    output_result(
        "Evaluation finished",
        &EvaluationOutput {
            corpus_documents,
            training_documents: split.training.len(),
            test_documents: split.test.len(),
            categories: stats.categories,
            vocabulary_size: stats.vocabulary_size,
            pruned_terms: stats.pruned_terms,
            correct: report.correct,
            incorrect: report.incorrect,
            accuracy: report.accuracy(),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Train on the whole corpus and classify ad-hoc files.
fn run_classify(args: ClassifyArgs, cli_args: &KentronArgs) -> Result<()> {
    let documents = load_and_extract(&args.training, cli_args)?;
    let classifier = RocchioClassifier::train(&documents, &args.training.train_config())?;

    let extractor = UnicodeTermExtractor::new();
    let pool = ParallelExtractor::new(&args.training.extraction_config())?;

    let mut targets = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
        let mut doc = Document::new(name, fs::read_to_string(file)?);
        doc.path = Some(file.clone());
        targets.push(doc);
    }
    let targets = pool.extract_corpus(&extractor, targets)?;

    let mut results = Vec::with_capacity(targets.len());
    for (doc, outcome) in targets.iter().zip(classifier.classify_batch(&targets)) {
        let result = outcome?;
        results.push(ClassificationOutput {
            document: doc.name.clone(),
            best_class: result.best_class,
            best_score: result.best_score,
        });
    }

    let stats = classifier.stats();
    output_result(
        "Classification finished",
        &ClassifyRunOutput {
            categories: stats.categories,
            vocabulary_size: stats.vocabulary_size,
            results,
        },
        cli_args,
    )
}
