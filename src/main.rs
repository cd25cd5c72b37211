use dotenvy::dotenv;
use tracing::{info, warn};

use yt_tools_api::config::AppConfig;
use yt_tools_api::handlers::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.proxy.is_none() {
        warn!("Webshare proxy credentials not set; connecting to YouTube directly");
    }

    let state = AppState::new(&config)?;
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        host = %config.host,
        port = config.port,
        proxy_configured = config.proxy.is_some(),
        "listening"
    );
    info!(
        "endpoints: GET /health, POST /video-data, POST /video-transcript-languages, \
         POST /video-captions, POST /video-timestamps"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
