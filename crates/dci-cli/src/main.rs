// crates/dci-cli/src/main.rs
//
// CLI entrypoint for cross-domain sentiment classification with
// Distributional Correspondence Indexing.
//
// Three run shapes share one runner: `full` (dictionary, optional unlabeled
// corpora), `nodict` (same language on both sides) and `nounlabeled`
// (dictionary, labeled corpora only). Parameters come from a TOML file
// (`--config`), command-line flags, or both, with flags taking precedence.

mod commands;
mod output;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::args::{merge_params, CorpusArgs, DciArgs, DictionaryArgs, UnlabeledArgs};
use dci_pipeline::{RunKind, RunParams};
use output::OutputFormat;

/// DCI cross-domain sentiment classification.
#[derive(Parser, Debug)]
#[command(
    name = "dci",
    version = "0.1.0",
    about = "Cross-domain sentiment classification with Distributional Correspondence Indexing"
)]
struct Cli {
    /// Path to a TOML file with run parameters.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Cross-lingual run with a dictionary and optional unlabeled corpora.
    Full {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        unlabeled: UnlabeledArgs,
        #[command(flatten)]
        dictionary: DictionaryArgs,
        #[command(flatten)]
        dci: DciArgs,
    },

    /// Same-language run: terms are aligned by identity.
    #[command(name = "nodict")]
    NoDict {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        unlabeled: UnlabeledArgs,
        #[command(flatten)]
        dci: DciArgs,
    },

    /// Cross-lingual run from labeled corpora only.
    #[command(name = "nounlabeled")]
    NoUnlabeled {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        dictionary: DictionaryArgs,
        #[command(flatten)]
        dci: DciArgs,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => Some(RunParams::load(path)?),
        None => None,
    };

    let none_unlabeled = UnlabeledArgs::default();
    let none_dictionary = DictionaryArgs::default();
    let (kind, params) = match &cli.command {
        Commands::Full {
            corpus,
            unlabeled,
            dictionary,
            dci,
        } => (
            RunKind::Full,
            merge_params(base, corpus, unlabeled, dictionary, dci)?,
        ),
        Commands::NoDict {
            corpus,
            unlabeled,
            dci,
        } => (
            RunKind::NoDict,
            merge_params(base, corpus, unlabeled, &none_dictionary, dci)?,
        ),
        Commands::NoUnlabeled {
            corpus,
            dictionary,
            dci,
        } => (
            RunKind::NoUnlabeled,
            merge_params(base, corpus, &none_unlabeled, dictionary, dci)?,
        ),
    };

    // Initialize tracing: RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&params.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.config {
        tracing::info!("Loaded configuration from {}", path.display());
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    commands::run::run(kind, &params, format)
}
