//! Owner dashboard view model and the derivation pipeline that builds it.

use chrono::NaiveDate;
use serde::Serialize;

use super::filter::PropertyListing;
use super::grouping::BatchIndex;
use super::ranking::{rank_actions, rank_deadlines, DEADLINE_DISPLAY_LIMIT};
use super::snapshot::{PortfolioSnapshot, RejectedRecord};
use super::stats::{revenue_trend, DashboardStats, RevenuePoint};
use super::synthesis::{synthesize, PropertyStatus, UpcomingDeadline, UrgentAction};

/// Everything the owner dashboard renders, derived from one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboard {
    /// Day the snapshot was evaluated against.
    pub as_of: NaiveDate,
    pub stats: DashboardStats,
    /// Ranked by severity.
    pub urgent_actions: Vec<UrgentAction>,
    /// The soonest deadlines, ranked by date.
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
    pub properties: Vec<PropertyStatus>,
    pub revenue_trend: Vec<RevenuePoint>,
    pub rejected_records: Vec<RejectedRecord>,
}

/// Runs one complete synthesis pass over `snapshot`.
pub fn derive_dashboard(snapshot: &PortfolioSnapshot, as_of: NaiveDate) -> OwnerDashboard {
    let synthesis = synthesize(snapshot, as_of);
    let stats = DashboardStats::from_totals(&synthesis.totals, snapshot.pending_applications());
    let urgent_actions = rank_actions(synthesis.actions);
    let upcoming_deadlines = rank_deadlines(synthesis.deadlines, DEADLINE_DISPLAY_LIMIT);

    tracing::debug!(
        properties = stats.total_properties,
        actions = urgent_actions.len(),
        deadlines = upcoming_deadlines.len(),
        rejected = snapshot.rejected().len(),
        "Derived owner dashboard"
    );

    OwnerDashboard {
        as_of,
        revenue_trend: revenue_trend(&stats, as_of),
        stats,
        urgent_actions,
        upcoming_deadlines,
        properties: synthesis.statuses,
        rejected_records: snapshot.rejected().to_vec(),
    }
}

/// Listings for the portfolio grid, classified with the same rules as the dashboard.
pub fn portfolio_listings(snapshot: &PortfolioSnapshot, as_of: NaiveDate) -> Vec<PropertyListing> {
    let index = BatchIndex::build(snapshot);
    PropertyListing::from_properties(snapshot.properties(), &index.occupied_ids(), as_of)
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;
