use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use linux_helper::api::{router, AppState};
use linux_helper::config::Config;
use linux_helper::suggest::{OpenAiProvider, SuggestionProvider};
use linux_helper::{logging, MemoryCatalog, SearchEngine};

#[derive(Parser)]
#[command(name = "server", about = "Serve the command catalog over HTTP", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Port; overrides the configured one
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    logging::init(&config.logging.level);
    config.log_summary();

    let catalog = MemoryCatalog::load_or_builtin(&config.catalog.path)
        .with_context(|| format!("loading catalog from {}", config.catalog.path.display()))?;
    info!(records = catalog.len(), "catalog ready");

    let suggester: Option<Arc<dyn SuggestionProvider>> = match OpenAiProvider::from_config(&config.ai) {
        Ok(p) => Some(Arc::new(p)),
        Err(e) => {
            warn!(error = %e, "AI suggestions disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        engine: SearchEngine::new(catalog),
        suggester,
    });
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, cli.port.unwrap_or(config.server.port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server running at http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
