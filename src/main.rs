use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use exam_compliance::api::{AppState, create_router};
use exam_compliance::config::ConfigLoader;
use exam_compliance::error::{ServiceError, ServiceResult};
use exam_compliance::store::InMemoryStore;
use exam_compliance::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "exam-compliance",
    about = "Serve the medical examination compliance due list",
    version
)]
struct Cli {
    /// Directory holding service.yaml, access_tokens.yaml and roster.yaml
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,
    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> ServiceResult<()> {
    let config = ConfigLoader::load(&cli.config)?;
    telemetry::init(config.settings())?;

    let store = InMemoryStore::new();
    config.seed(&store)?;

    let bind_address = cli
        .bind
        .unwrap_or_else(|| config.settings().bind_address.clone());
    let state = AppState::new(config, Arc::new(store));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| ServiceError::Server {
            message: format!("failed to bind {}: {}", bind_address, e),
        })?;
    info!(%bind_address, "Exam compliance API listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServiceError::Server {
            message: e.to_string(),
        })
}
