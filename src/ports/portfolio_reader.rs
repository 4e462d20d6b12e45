use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{OwnerId, PropertyId};
use crate::domain::portfolio::{MaintenanceStats, OccupancyRecord, Property, RentPayment};

/// Read-only port for the collections a dashboard pass consumes.
///
/// Every query after `list_properties` is scoped to the property ids of
/// one owner. An empty result is valid zero-data, not an error.
#[async_trait]
pub trait PortfolioReader: Send + Sync {
    /// Lists all properties of an owner, whatever their listing status.
    async fn list_properties(&self, owner_id: &OwnerId) -> Result<Vec<Property>, PortfolioError>;

    /// Lists tenancy records for the given properties.
    async fn list_occupancies(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<OccupancyRecord>, PortfolioError>;

    /// Lists rent payment records for the given properties.
    async fn list_rent_payments(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<RentPayment>, PortfolioError>;

    /// Returns pre-aggregated maintenance counters keyed by property.
    async fn maintenance_stats(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, MaintenanceStats>, PortfolioError>;

    /// Counts applications still waiting for a decision.
    async fn count_pending_applications(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<u32, PortfolioError>;
}

/// Errors that can occur while reading portfolio data
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for PortfolioError {
    fn from(err: sqlx::Error) -> Self {
        PortfolioError::Database(err.to_string())
    }
}
