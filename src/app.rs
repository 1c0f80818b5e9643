use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::ServerConfig;
use crate::interfaces::http::start_server;

pub async fn run() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let config = ServerConfig::load()?;
    init_tracing(&config);

    if let Some(err) = dotenv_failure(&dotenv) {
        warn!(error = %err, "Failed to load .env file");
    }

    start_server(&config)?.await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured filter
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// A missing `.env` file is not a failure
fn dotenv_failure(result: &dotenvy::Result<PathBuf>) -> Option<&dotenvy::Error> {
    result.as_ref().err().filter(|err| !err.not_found())
}
