use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pa_donde::prelude::*;

/// pa-donde - places of interest REST service
#[derive(Parser)]
#[command(name = "pa-donde")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file; skips the default search path
    #[arg(short, long, env = "PA_DONDE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long, env = "PA_DONDE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::load().context("loading configuration")?,
    };
    if let Some(port) = cli.port {
        config.service.port = port;
    }
    config.validate()?;

    init_tracing(&config)?;

    match config.database.engine {
        #[cfg(feature = "sqlite")]
        DatabaseEngine::Sqlite => {
            let pool = connect_sqlite(&config.database).await?;
            let repository = SqlitePlaceRepository::new(pool);
            repository.migrate().await?;
            run(config, repository).await
        }
        #[cfg(not(feature = "sqlite"))]
        DatabaseEngine::Sqlite => {
            anyhow::bail!("database.engine = \"sqlite\" requires the `sqlite` feature")
        }
        DatabaseEngine::Memory => {
            tracing::warn!("Using the in-memory store; places are lost on restart");
            run(config, InMemoryPlaceRepository::new()).await
        }
    }
}

async fn run<R: PlaceRepository>(config: Config, repository: R) -> anyhow::Result<()> {
    let state = AppState::new(config.clone(), repository);
    Server::new(config).serve(router(state)).await?;
    Ok(())
}
