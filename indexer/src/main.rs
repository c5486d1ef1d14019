use anyhow::Result;
use clap::{Parser, Subcommand};
use notegrep_core::{DocumentStore, EngineConfig, FsVault, SearchEngine, Vault};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query a TF-IDF note index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every eligible note under a directory
    Build {
        /// Notes directory
        #[arg(long)]
        notes: String,
        /// Index directory
        #[arg(long)]
        index: String,
        /// Content prefix marking command/chat notes to exclude (repeatable)
        #[arg(long = "command-prefix")]
        command_prefixes: Vec<String>,
        /// Path prefix of application-internal conversation notes
        #[arg(long)]
        conversation_folder: Option<String>,
    },
    /// Run a ranked query against an existing index
    Search {
        /// Notes directory
        #[arg(long)]
        notes: String,
        /// Index directory
        #[arg(long)]
        index: String,
        /// Query terms
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Report whether an index exists and how many documents it holds
    Status {
        /// Index directory
        #[arg(long)]
        index: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            notes,
            index,
            command_prefixes,
            conversation_folder,
        } => build(&notes, &index, command_prefixes, conversation_folder),
        Commands::Search {
            notes,
            index,
            query,
            limit,
        } => search(&notes, &index, &query, limit),
        Commands::Status { index } => status(&index),
    }
}

fn build(
    notes: &str,
    index: &str,
    command_prefixes: Vec<String>,
    conversation_folder: Option<String>,
) -> Result<()> {
    let store = DocumentStore::open(index)?;
    let vault: Arc<dyn Vault> = Arc::new(FsVault::new(notes));
    let config = EngineConfig {
        command_prefixes,
        conversation_folder,
    };
    let engine = SearchEngine::new(store.clone(), vault, config);
    engine.index_all_files();
    engine.wait_for_pending();
    store.flush()?;
    tracing::info!(documents = store.count_documents(), index, "index build complete");
    Ok(())
}

fn search(notes: &str, index: &str, query: &str, limit: usize) -> Result<()> {
    let store = DocumentStore::open(index)?;
    let vault: Arc<dyn Vault> = Arc::new(FsVault::new(notes));
    let engine = SearchEngine::new(store, vault, EngineConfig::default());

    if !engine.is_index_built() {
        println!("index is empty, run `indexer build` first");
        return Ok(());
    }
    let results = engine.search(query, limit);
    if results.is_empty() {
        println!("no results for \"{query}\"");
        return Ok(());
    }
    for (rank, result) in results.iter().enumerate() {
        println!("{:>2}. {}  (score {:.4})", rank + 1, result.path, result.score);
        for line in &result.matches {
            println!("      {:>4} | {}", line.position, line.text);
        }
    }
    Ok(())
}

fn status(index: &str) -> Result<()> {
    let store = DocumentStore::open(index)?;
    println!("index built: {}", store.exists_any());
    println!("documents:   {}", store.count_documents());
    Ok(())
}
