use std::sync::Arc;

use weekendfare::api::create_router;
use weekendfare::config::{self, ProviderConfig};
use weekendfare::search::SearchClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    // Bridge log crate -> tracing (so log::warn! etc. work)
    // tracing_subscriber's default features already install the
    // tracing_log::LogTracer, so no explicit init here.

    let bind_addr = config::bind_addr_from_env();
    let client = match ProviderConfig::from_env() {
        Ok(provider) => Some(Arc::new(SearchClient::new(provider))),
        Err(e) => {
            // Serve anyway; /api/search degrades to 503 until credentials
            // are configured.
            tracing::warn!("starting without a search client: {e:#}");
            None
        }
    };

    let app = create_router(client);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
