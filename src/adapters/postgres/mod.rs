//! PostgreSQL adapters - Database implementations for the portfolio ports.
//!
//! - `PostgresPortfolioReader` - Read-optimized portfolio queries
//! - `PostgresApplicationRepository` - Tenant applications for the pipeline board

mod application_repository;
mod portfolio_reader;

pub use application_repository::PostgresApplicationRepository;
pub use portfolio_reader::PostgresPortfolioReader;
