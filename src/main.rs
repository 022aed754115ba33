use std::sync::Arc;

use edge_summarizer::api::routes::create_router;
use edge_summarizer::config::Config;
use edge_summarizer::llm::WorkersAi;
use edge_summarizer::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let ai = WorkersAi::new(
        config.cloudflare_account_id.clone(),
        config.cloudflare_api_token.clone(),
    );

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        ai: Arc::new(ai),
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
