//! Rentwise HTTP server.
//!
//! Serves the portfolio API from PostgreSQL when `RENTWISE__DATABASE__URL`
//! is set, otherwise from an in-memory demo portfolio.

use std::sync::Arc;

use chrono::Utc;
use http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rentwise::adapters::http::{api_router, PortfolioAppState};
use rentwise::adapters::{
    seed_demo_portfolio, InMemoryPortfolioStore, PostgresApplicationRepository,
    PostgresPortfolioReader,
};
use rentwise::config::{AppConfig, ServerConfig};
use rentwise::domain::foundation::OwnerId;

const DEMO_OWNER: &str = "demo-owner";

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if server.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| HeaderValue::from_str(o).ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

async fn build_state(config: &AppConfig) -> Result<PortfolioAppState, Box<dyn std::error::Error>> {
    match &config.database {
        Some(database) => {
            let pool = database.pool_options().connect(&database.url).await?;
            tracing::info!(max_connections = database.max_connections, "Connected to PostgreSQL");
            Ok(PortfolioAppState::new(
                Arc::new(PostgresPortfolioReader::new(pool.clone())),
                Arc::new(PostgresApplicationRepository::new(pool)),
            ))
        }
        None => {
            let store = InMemoryPortfolioStore::new();
            let owner = OwnerId::new(DEMO_OWNER)?;
            seed_demo_portfolio(&store, &owner, Utc::now().date_naive()).await;
            tracing::warn!(owner = DEMO_OWNER, "No database configured, serving demo portfolio");
            let store = Arc::new(store);
            Ok(PortfolioAppState::new(store.clone(), store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let state = build_state(&config).await?;
    let app = api_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.server.request_timeout()))
            .layer(cors_layer(&config.server)),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Rentwise listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
