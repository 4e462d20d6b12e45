//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod applications;
pub mod portfolio;

pub use applications::{
    GetPipelineBoardHandler, GetPipelineBoardQuery, MoveApplicationCommand,
    MoveApplicationHandler, MoveApplicationResult,
};
pub use portfolio::{
    DashboardRefresher, GetOwnerDashboardHandler, GetOwnerDashboardQuery,
    ListPropertiesHandler, ListPropertiesQuery, ListPropertiesResult, RefreshOutcome,
    RefreshResult,
};
