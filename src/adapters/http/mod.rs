//! HTTP adapters - REST API implementations.

pub mod portfolio;

use axum::routing::get;
use axum::Router;

pub use portfolio::{portfolio_routes, PortfolioAppState};

/// Full API router: portfolio endpoints plus a liveness check.
pub fn api_router(state: PortfolioAppState) -> Router {
    portfolio_routes(state).route("/health", get(|| async { "ok" }))
}
