use std::sync::Arc;

use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use people_directory::cache::create_cache;
use people_directory::config::Config;
use people_directory::okta::OktaClient;
use people_directory::{logging, routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting people directory backend");
    if config.okta_org_url.is_none() || config.okta_api_token.is_none() {
        tracing::warn!(
            "Okta credentials not configured; directory endpoints will fail until \
             OKTA_ORG_URL and OKTA_API_TOKEN are set"
        );
    }

    let cache = create_cache(config.cache_backend);
    let okta_client = OktaClient::from_config(&config);

    let state = Arc::new(AppState {
        config: config.clone(),
        okta_client,
        cache,
    });

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
