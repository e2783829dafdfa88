use std::env;
use std::error::Error;
use std::path::Path;
use std::time::Duration;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::data::{DataLoader, DataSnapshot};
use payroll_engine::error::EngineResult;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/ph";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const DATA_LOAD_ATTEMPTS: u32 = 3;
const DATA_LOAD_BACKOFF: Duration = Duration::from_millis(500);

/// Loads the data snapshot, retrying a few times before giving up.
async fn load_data_with_retry(dir: &Path) -> EngineResult<DataSnapshot> {
    let mut attempt = 1;
    loop {
        match DataLoader::load(dir) {
            Ok(snapshot) => return Ok(snapshot),
            Err(err) if attempt < DATA_LOAD_ATTEMPTS => {
                warn!(attempt, error = %err, "Failed to load data; retrying");
                tokio::time::sleep(DATA_LOAD_BACKOFF * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let data_dir = env::var("PAYROLL_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(path = %config_dir, "Configuration loaded");

    let snapshot = load_data_with_retry(Path::new(&data_dir)).await?;

    let app = create_router(AppState::new(config, snapshot, &data_dir));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "Payroll engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
