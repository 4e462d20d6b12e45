//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store for demo mode and tests
//! - `postgres` - PostgreSQL-backed reader and repository
//! - `http` - Axum REST API

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::{seed_demo_portfolio, InMemoryPortfolioStore};
pub use postgres::{PostgresApplicationRepository, PostgresPortfolioReader};
