use clap::Parser;
use std::sync::Arc;
use tasks_server::config::{Config, ENV_PREFIX, Overrides};
use tracing_subscriber::EnvFilter;

/// Task management HTTP API server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Port to listen on. Overrides TASKS_PORT.
    port: Option<u16>,
    /// Database URL. Overrides TASKS_DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();
    let config = Config::load(
        config::Environment::with_prefix(ENV_PREFIX),
        Overrides {
            port: cli.port,
            database_url: cli.database_url,
        },
    )?;
    tasks_server::web::start_web_server(Arc::new(config)).await
}
