//! HTTP routes for portfolio and pipeline endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    approve_application, get_dashboard, get_pipeline_board, list_properties, move_application,
    refresh_dashboard, reject_application, PortfolioAppState,
};

/// Creates the portfolio router with all routes.
pub fn portfolio_routes(state: PortfolioAppState) -> Router {
    Router::new()
        .route("/api/portfolio/dashboard", get(get_dashboard))
        .route("/api/portfolio/dashboard/refresh", post(refresh_dashboard))
        .route("/api/portfolio/properties", get(list_properties))
        .route("/api/portfolio/applications", get(get_pipeline_board))
        .route("/api/applications/:id/move", post(move_application))
        .route("/api/applications/:id/approve", post(approve_application))
        .route("/api/applications/:id/reject", post(reject_application))
        .with_state(state)
}
