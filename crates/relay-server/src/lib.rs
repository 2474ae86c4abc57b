//! Relay Server Library
//!
//! Provides the HTTP interface: health check, single-shot completion and the
//! agent workflow endpoint.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use relay_core::{RelayConfig, RelayService};
use std::sync::Once;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::ApiError;
pub use state::AppState;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber (only once)
///
/// `RUST_LOG` wins when set; otherwise `level` applies to Relay's crates and
/// the HTTP trace layer.
pub fn init_tracing(level: &str) {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| {
                    format!("relay={0},relay_server={0},relay_core={0},tower_http={0}", level)
                }),
            ))
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

/// CORS policy for the configured origins
///
/// A `*` entry allows any origin without credentials; otherwise only the
/// listed origins are allowed, with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the Axum router with all routes
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.allow_origins);

    Router::new()
        .route("/api/health", get(routes::health_check))
        .route("/api/ai", post(routes::complete))
        .route("/api/agents/workflow", post(routes::agent_workflow))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the Relay web server with the given configuration
pub async fn run_server(config: RelayConfig) -> anyhow::Result<()> {
    init_tracing(&config.server.log_level);

    tracing::info!(version = relay_core::version(), "Starting Relay Server...");
    if !config.provider.has_credential() {
        tracing::warn!("GROQ_API_KEY not configured; AI endpoints will return 500");
    }
    tracing::debug!(provider = ?config.provider, origins = ?config.server.allow_origins, "Loaded configuration");

    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState::new(RelayService::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}
