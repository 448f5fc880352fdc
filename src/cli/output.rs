//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{KentronArgs, OutputFormat};
use crate::error::Result;

/// Result structure for the evaluate command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationOutput {
    pub corpus_documents: usize,
    pub training_documents: usize,
    pub test_documents: usize,
    pub categories: usize,
    pub vocabulary_size: usize,
    pub pruned_terms: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f64,
    pub duration_ms: u64,
}

/// Per-file result structure for the classify command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationOutput {
    pub document: String,
    pub best_class: Option<String>,
    pub best_score: f64,
}

/// Result structure for the classify command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRunOutput {
    pub categories: usize,
    pub vocabulary_size: usize,
    pub results: Vec<ClassificationOutput>,
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: Serialize + HumanDisplay>(
    message: &str,
    result: &T,
    args: &KentronArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
            Ok(())
        }
    }
}

/// Human-readable rendering of a command result.
pub trait HumanDisplay {
    fn print_human(&self);
}

impl HumanDisplay for EvaluationOutput {
    fn print_human(&self) {
        println!("Evaluation:");
        println!("═══════════");
        println!("Corpus documents:   {}", self.corpus_documents);
        println!("Training documents: {}", self.training_documents);
        println!("Test documents:     {}", self.test_documents);
        println!("Categories:         {}", self.categories);
        println!("Vocabulary size:    {}", self.vocabulary_size);
        println!("Pruned terms:       {}", self.pruned_terms);
        println!();
        println!("Correct:            {}", self.correct);
        println!("Incorrect:          {}", self.incorrect);
        println!("Accuracy:           {:.2}%", self.accuracy * 100.0);
        println!("Total time:         {}ms", self.duration_ms);
    }
}

impl HumanDisplay for ClassifyRunOutput {
    fn print_human(&self) {
        println!("Classification:");
        println!("═══════════════");
        println!(
            "Trained on {} categories, {} feature terms",
            self.categories, self.vocabulary_size
        );
        println!();
        for result in &self.results {
            match &result.best_class {
                Some(class) => println!(
                    "{}: {} (score {:.4})",
                    result.document, class, result.best_score
                ),
                None => println!("{}: no matching class", result.document),
            }
        }
    }
}
