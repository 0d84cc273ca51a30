use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wellspace_backend::{logging, routes, AppState, Config, GeminiClient, KvStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WellSpace backend");

    if config.gemini.api_key.is_empty() {
        tracing::warn!(
            "GEMINI_API_KEY is not set; routine generation will always serve the fallback plan"
        );
    }

    // Initialize components
    let store = Arc::new(KvStore::open(&config.database.url)?);
    let generator = Arc::new(GeminiClient::new(
        &config.gemini.base_url,
        &config.gemini.api_key,
        &config.gemini.model,
    ));
    let state = Arc::new(AppState::new(config, store, generator));

    // Drive all focus timers from one interval task.
    tokio::spawn(state.timer.clone().run());

    // Build CORS layer
    let cors = if state.config.cors.origins == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors
            .origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build router
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router(state.clone()))
        .merge(routes::routine::router(state.clone()))
        .merge(routes::focus::router(state.clone()))
        .merge(routes::activity::router(state.clone()))
        .merge(routes::dashboard::router(state.clone()))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
