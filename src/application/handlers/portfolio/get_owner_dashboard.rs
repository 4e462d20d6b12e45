//! GetOwnerDashboardHandler - Query handler for the owner dashboard.
//!
//! Loads one snapshot through the portfolio reader and runs a complete
//! derivation pass over it.

use std::sync::Arc;

use chrono::NaiveDate;

use super::load_snapshot::load_snapshot;
use crate::domain::foundation::OwnerId;
use crate::domain::portfolio::{derive_dashboard, OwnerDashboard};
use crate::ports::{PortfolioError, PortfolioReader};

/// Query to derive the dashboard of one owner.
#[derive(Debug, Clone)]
pub struct GetOwnerDashboardQuery {
    pub owner_id: OwnerId,
    /// Day used for vacancy ages, lease countdowns and rent due dates.
    pub as_of: NaiveDate,
}

/// Result of a successful dashboard query.
pub type GetOwnerDashboardResult = OwnerDashboard;

/// Handler for deriving the owner dashboard.
#[derive(Clone)]
pub struct GetOwnerDashboardHandler {
    reader: Arc<dyn PortfolioReader>,
}

impl GetOwnerDashboardHandler {
    pub fn new(reader: Arc<dyn PortfolioReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetOwnerDashboardQuery,
    ) -> Result<GetOwnerDashboardResult, PortfolioError> {
        let snapshot = load_snapshot(self.reader.as_ref(), &query.owner_id).await?;
        Ok(derive_dashboard(&snapshot, query.as_of))
    }
}
