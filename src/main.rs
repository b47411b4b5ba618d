//! Server entry point: load env, open the pool, serve the API.

use showcase_api::{app, validate_registry, AppConfig, AppState, PgStore, SharedSecretAuthenticator};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showcase_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    validate_registry()?;

    let addr = config.bind_addr();
    let body_limit = config.body_limit;
    let store = PgStore::connect(&config.database_url, config.db_max_connections, config.db_acquire_timeout).await?;
    tracing::info!("database pool ready");

    let auth = SharedSecretAuthenticator::new(config.admin_token);
    let state = AppState::new(Arc::new(store), Arc::new(auth));
    let router = app(state, body_limit);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
