use anyhow::Result;
use clap::Parser;
use notegrep_core::{DocumentStore, EngineConfig, FsVault, SearchEngine, Vault};
use notegrep_server::build_app;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Notes directory
    #[arg(long, default_value = "./notes")]
    notes: String,
    /// Index directory
    #[arg(long, default_value = "./index")]
    index: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Content prefix marking command/chat notes to exclude (repeatable)
    #[arg(long = "command-prefix")]
    command_prefixes: Vec<String>,
    /// Path prefix of application-internal conversation notes
    #[arg(long)]
    conversation_folder: Option<String>,
    /// Rebuild the index before serving
    #[arg(long, default_value_t = false)]
    reindex: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let store = DocumentStore::open(&args.index)?;
    let vault: Arc<dyn Vault> = Arc::new(FsVault::new(&args.notes));
    let config = EngineConfig {
        command_prefixes: args.command_prefixes,
        conversation_folder: args.conversation_folder,
    };
    let engine = Arc::new(SearchEngine::new(store, vault, config));
    if args.reindex {
        engine.index_all_files();
    }

    let app = build_app(Arc::clone(&engine));
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
