//! Portfolio query handlers.
//!
//! Read-only handlers for the owner dashboard and the portfolio grid, plus
//! the per-owner refresh coordinator.

mod get_owner_dashboard;
mod list_properties;
mod load_snapshot;
mod refresh_dashboard;

#[cfg(test)]
pub(crate) mod test_support;

pub use get_owner_dashboard::{
    GetOwnerDashboardHandler, GetOwnerDashboardQuery, GetOwnerDashboardResult,
};
pub use list_properties::{ListPropertiesHandler, ListPropertiesQuery, ListPropertiesResult};
pub use load_snapshot::{load_listing_snapshot, load_snapshot};
pub use refresh_dashboard::{DashboardRefresher, RefreshOutcome, RefreshResult};
