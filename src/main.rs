use anyhow::Context;
use polyeye::{api, Config, PolymarketDataSource, TradeSource};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Configuration error")?;
    let port = config.port;

    let source: Arc<dyn TradeSource> = Arc::new(
        PolymarketDataSource::new(
            config.data_api_url.clone(),
            config.gamma_api_url.clone(),
            config.trades_page_limit,
            config.request_timeout(),
        )
        .context("Failed to build Polymarket client")?,
    );

    let app = api::create_router(api::AppState::new(source, config));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
