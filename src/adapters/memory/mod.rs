//! In-memory adapters.
//!
//! - `InMemoryPortfolioStore` - Implements `PortfolioReader` and `ApplicationRepository`
//! - `seed_demo_portfolio` - Sample data for demo mode

mod demo;
mod portfolio_store;

pub use demo::seed_demo_portfolio;
pub use portfolio_store::InMemoryPortfolioStore;
