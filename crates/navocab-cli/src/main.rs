//! navocab: command-line tool for SKOS vocabularies.
//!
//! Loads vocabulary documents into a triple store (in memory unless a store
//! location is configured), validates their structure and renders them as
//! markdown or as the nested JSON tree used by web UIs.

mod markdown;
mod uijson;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use navocab_store::{
    validate, Bindings, ConceptRepository, StoreConfig, VocabularyRepository, VocabularyStore,
};

#[derive(Parser)]
#[command(name = "navocab")]
#[command(author, version, about = "Load, validate and render SKOS vocabularies")]
#[command(propagate_version = true)]
struct Cli {
    /// Store location: a directory, or "default" for an in-memory store
    #[arg(long, global = true)]
    store: Option<String>,

    /// IRI of the named graph holding the vocabularies
    #[arg(long = "store-id", global = true)]
    store_id: Option<String>,

    /// Clear the stored vocabularies before loading
    #[arg(long, global = true)]
    purge: bool,

    /// Format of source documents whose extension is not recognised
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load vocabulary documents and show store statistics
    Load {
        /// Documents to load, bases before their extensions
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },

    /// Validate vocabulary structure
    Validate {
        /// Vocabulary document to validate
        source: PathBuf,

        /// Further vocabularies to load once the source conforms
        #[arg(short, long)]
        vocab: Vec<PathBuf>,
    },

    /// Generate a markdown representation of the base vocabulary
    Markdown {
        sources: Vec<PathBuf>,
    },

    /// Render the concept hierarchy as JSON for inclusion in a web UI
    Uijson {
        sources: Vec<PathBuf>,

        /// Traverse vocabulary extensions
        #[arg(short, long)]
        extensions: bool,
    },

    /// Run a SPARQL SELECT against the loaded vocabularies
    Query {
        /// Query text
        sparql: String,

        sources: Vec<PathBuf>,
    },

    /// Show one concept as JSON
    Concept {
        /// Concept IRI or prefixed name
        id: String,

        sources: Vec<PathBuf>,
    },

    /// List the loaded vocabularies
    Vocabularies {
        sources: Vec<PathBuf>,
    },

    /// Print the concepts narrower than a concept as an indented tree
    Tree {
        /// Concept IRI or prefixed name
        id: String,

        sources: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = init_tracing();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "navocab=info")
///
/// Console logs go to stderr; stdout carries the command output.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "navocab=info,navocab_store=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("navocab.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    tracing::debug!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

/// Resolve the store configuration: config file or environment, then flags.
fn store_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::load()?;
    if let Some(ref location) = cli.store {
        config = config.location(location);
    }
    if let Some(ref identifier) = cli.store_id {
        config = config.identifier(identifier);
    }
    if cli.purge {
        config = config.purge(true);
    }
    if let Some(ref format) = cli.format {
        config = config.format(format);
    }
    Ok(config)
}

fn load_all(store: &mut VocabularyStore, sources: &[PathBuf]) -> anyhow::Result<()> {
    for source in sources {
        store.load(source, None)?;
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = store_config(&cli)?;
    info!(location = %config.location, identifier = %config.identifier, "Opening store");
    let mut store = VocabularyStore::open(&config)?;
    let outcome = execute(&cli.command, &config, &mut store);
    store.close()?;
    outcome
}

/// Run one command against an open store. The caller closes the store
/// whatever the outcome.
fn execute(
    command: &Commands,
    config: &StoreConfig,
    store: &mut VocabularyStore,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Load { sources } => {
            for source in sources {
                let outcome = store.load(source, None)?;
                println!(
                    "{}: {} triples, vocabulary {}, extension {}",
                    source.display(),
                    outcome.triple_count,
                    outcome.vocabulary.as_deref().unwrap_or("(none)"),
                    serde_json::to_string(&outcome.extension)?
                );
            }
            println!("Store {} at {}", store.triples().identifier(), config.location);
            println!("  triples: {}", store.len()?);
            for vocabulary in store.vocabularies()? {
                println!("  vocabulary: {}", store.compact(&vocabulary));
            }
        }

        Commands::Validate { source, vocab } => {
            store.load(source, None)?;
            let report = validate(store.triples())?;
            info!(conforms = report.conforms, "Structural conformance");
            if !report.conforms {
                for issue in &report.issues {
                    println!("{}", issue);
                }
                warn!(
                    issue_count = report.issues.len(),
                    "Vocabulary not in conformance, skipping further checks"
                );
                return Ok(ExitCode::FAILURE);
            }
            for extra in vocab {
                store.load(extra, None)?;
            }
            println!("{} conforms", source.display());
        }

        Commands::Markdown { sources } => {
            load_all(store, sources)?;
            let base = store.base_vocabulary()?;
            for line in markdown::describe_vocabulary(store, &base.uri, chrono::Utc::now())? {
                println!("{}", line);
            }
        }

        Commands::Uijson {
            sources,
            extensions,
        } => {
            load_all(store, sources)?;
            let tree = uijson::concept_tree(store, *extensions)?;
            print_json(&tree.to_json())?;
        }

        Commands::Query { sparql, sources } => {
            load_all(store, sources)?;
            let rows = store.triples().query_rows(sparql, &Bindings::new())?;
            print_json(&rows)?;
        }

        Commands::Concept { id, sources } => {
            load_all(store, sources)?;
            print_json(&store.concept(id)?)?;
        }

        Commands::Vocabularies { sources } => {
            load_all(store, sources)?;
            let mut vocabularies = Vec::new();
            for uri in store.vocabularies()? {
                vocabularies.push(store.vocabulary(&uri)?);
            }
            print_json(&vocabularies)?;
        }

        Commands::Tree { id, sources } => {
            load_all(store, sources)?;
            println!("{}", store.compact(&store.expand(id)));
            for step in store.walk_narrower(id, 1) {
                let (uri, depth) = step?;
                println!("{}{}", "  ".repeat(depth), store.compact(&uri));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
