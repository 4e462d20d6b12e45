//! Portfolio HTTP adapter module.
//!
//! Provides REST API endpoints for the owner dashboard, the portfolio grid
//! and the application pipeline board.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{AuthenticatedOwner, PortfolioApiError, PortfolioAppState};
pub use routes::portfolio_routes;
