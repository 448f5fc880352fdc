//! Command line argument parsing for the Kentron CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classification::{RocchioConfig, RocchioVariant, TrainConfig, WeightingScheme};
use crate::evaluation::{SplitConfig, SplitMode};
use crate::parallel_extraction::{ExtractionConfig, FailurePolicy};

/// Kentron - a Rocchio centroid text classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "kentron")]
#[command(about = "A Rocchio centroid text classifier for Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KentronArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KentronArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train on a labeled corpus and evaluate on a held-out split
    Evaluate(EvaluateArgs),

    /// Train on a labeled corpus and classify ad-hoc files
    Classify(ClassifyArgs),
}

/// Options shared by every command that trains a classifier
#[derive(Parser, Debug, Clone)]
pub struct TrainingOpts {
    /// Corpus directory (one sub-directory per category)
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Corpus is a flat directory of `<category>_<name>` files
    #[arg(long)]
    pub flat_layout: bool,

    /// Drop terms with an IDF below this threshold (0 disables pruning)
    #[arg(long, default_value_t = 0.0)]
    pub pruning_threshold: f64,

    /// Positive reinforcement factor of the Rocchio rule
    #[arg(long, default_value_t = 16.0)]
    pub beta: f64,

    /// Negative reinforcement factor of the Rocchio rule
    #[arg(long, default_value_t = 4.0)]
    pub gamma: f64,

    /// Fold the negative mean into the scaled positive accumulator
    /// (compatibility behavior) instead of subtracting it independently
    #[arg(long)]
    pub folded_rocchio: bool,

    /// Term weighting scheme
    #[arg(long, value_enum, default_value = "tf-idf")]
    pub weighting: WeightingArg,

    /// Number of extraction worker threads (0 = all hardware threads)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Skip documents whose term extraction fails instead of aborting
    #[arg(long)]
    pub skip_failed: bool,
}

impl TrainingOpts {
    /// Build the training configuration from the CLI flags.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            pruning_threshold: self.pruning_threshold,
            weighting: self.weighting.into(),
            rocchio: RocchioConfig {
                beta: self.beta,
                gamma: self.gamma,
                variant: if self.folded_rocchio {
                    RocchioVariant::Folded
                } else {
                    RocchioVariant::Standard
                },
            },
        }
    }

    /// Build the extraction pool configuration from the CLI flags.
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            num_threads: self.threads,
            failure_policy: if self.skip_failed {
                FailurePolicy::SkipDocument
            } else {
                FailurePolicy::FailFast
            },
        }
    }
}

/// Term weighting schemes selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightingArg {
    /// Plain term frequencies
    Tf,
    /// IDF-weighted term frequencies
    TfIdf,
}

impl From<WeightingArg> for WeightingScheme {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::Tf => WeightingScheme::TermFrequency,
            WeightingArg::TfIdf => WeightingScheme::TfIdf,
        }
    }
}

/// Arguments for the evaluate command
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub training: TrainingOpts,

    /// Fraction of each category held out for testing, in [0, 1)
    #[arg(long, default_value_t = 0.1)]
    pub testset_ratio: f64,

    /// Pick test documents at random instead of taking the last ones
    #[arg(long)]
    pub random_split: bool,

    /// Seed for the random split (implies --random-split)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl EvaluateArgs {
    /// Build the split configuration from the CLI flags.
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            testset_ratio: self.testset_ratio,
            mode: if self.random_split || self.seed.is_some() {
                SplitMode::Random { seed: self.seed }
            } else {
                SplitMode::TakeLast
            },
        }
    }
}

/// Arguments for the classify command
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub training: TrainingOpts,

    /// Files to classify after training
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}
