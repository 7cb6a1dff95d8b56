use deskhive::load_config;
use deskhive::services::clock::RemoteClock;
use deskhive::store::MemoryStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config()?;
    tracing::info!("loaded configuration:\n{}", config);

    // Demo round trip against the in-memory store.
    let store = Arc::new(MemoryStore::new());
    let clock = RemoteClock::new(store, &config);
    let now = clock.fetch_server_time().await;
    tracing::info!(server_time = %now, "synced with store clock");

    Ok(())
}
