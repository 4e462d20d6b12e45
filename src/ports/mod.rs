//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PortfolioReader` - Read side for properties, tenancies, payments and maintenance
//! - `ApplicationRepository` - Tenant applications on the pipeline board

mod application_repository;
mod portfolio_reader;

pub use application_repository::{ApplicationError, ApplicationRepository};
pub use portfolio_reader::{PortfolioError, PortfolioReader};
