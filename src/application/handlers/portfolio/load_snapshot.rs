//! Fetches and validates the inputs of one derivation pass.

use futures::try_join;

use crate::domain::foundation::{OwnerId, PropertyId};
use crate::domain::portfolio::{PortfolioSnapshot, SnapshotSources};
use crate::ports::{PortfolioError, PortfolioReader};

/// Loads a complete snapshot for `owner_id`.
///
/// Properties are fetched first; the four dependent collections are then
/// fetched concurrently. Any failure aborts the whole load.
pub async fn load_snapshot(
    reader: &dyn PortfolioReader,
    owner_id: &OwnerId,
) -> Result<PortfolioSnapshot, PortfolioError> {
    let properties = reader.list_properties(owner_id).await?;
    let ids: Vec<PropertyId> = properties.iter().map(|p| p.id).collect();

    let (occupancies, payments, maintenance, pending_applications) = try_join!(
        reader.list_occupancies(&ids),
        reader.list_rent_payments(&ids),
        reader.maintenance_stats(&ids),
        reader.count_pending_applications(&ids),
    )?;

    tracing::debug!(
        owner_id = %owner_id,
        properties = properties.len(),
        occupancies = occupancies.len(),
        payments = payments.len(),
        "Loaded portfolio snapshot"
    );

    Ok(PortfolioSnapshot::ingest(SnapshotSources {
        properties,
        occupancies,
        payments,
        maintenance,
        pending_applications,
    }))
}

/// Loads only what the portfolio grid needs: properties and tenancies.
pub async fn load_listing_snapshot(
    reader: &dyn PortfolioReader,
    owner_id: &OwnerId,
) -> Result<PortfolioSnapshot, PortfolioError> {
    let properties = reader.list_properties(owner_id).await?;
    let ids: Vec<PropertyId> = properties.iter().map(|p| p.id).collect();
    let occupancies = reader.list_occupancies(&ids).await?;

    Ok(PortfolioSnapshot::ingest(SnapshotSources {
        properties,
        occupancies,
        ..Default::default()
    }))
}
