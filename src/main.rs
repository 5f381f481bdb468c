use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use loadboard::{LoadBoardConfig, config, storage, web};

fn init_tracing(config: &LoadBoardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let board_config = LoadBoardConfig::load()?;
    init_tracing(&board_config);

    let store_path = board_config.store_path();
    storage::init(&store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    let port = board_config.server.port;
    config::init(board_config)?;

    web::run(port).await
}
