//! Portfolio state derivation.
//!
//! Turns a snapshot of properties, tenancies, rent payments and maintenance
//! aggregates into the owner dashboard and the filtered portfolio grid.
//!
//! Data flow: [`PortfolioSnapshot`] → [`BatchIndex`] → [`synthesize`] →
//! ranking → [`DashboardStats`] → [`OwnerDashboard`]. The grid takes the
//! same snapshot through [`portfolio_listings`] and [`filter_and_sort`].

mod classifier;
mod dashboard;
mod filter;
mod grouping;
mod ranking;
mod records;
mod snapshot;
mod stats;
mod synthesis;

pub use classifier::{
    action_severity, classify_health, vacancy_age_days, ActionKind, HealthSignals, PropertyHealth,
    Severity,
};
pub use dashboard::{derive_dashboard, portfolio_listings, OwnerDashboard};
pub use filter::{
    filter_and_sort, HealthFilter, PropertyFilter, PropertyListing, SortField, SortOrder,
    StatusFilter,
};
pub use grouping::{group_by_key, BatchIndex, RECENT_PAYMENT_WINDOW};
pub use ranking::{rank_actions, rank_deadlines, DEADLINE_DISPLAY_LIMIT};
pub use records::{
    ListingStatus, MaintenanceStats, OccupancyRecord, PaymentStatus, Property, RentPayment,
};
pub use snapshot::{PortfolioSnapshot, RejectedRecord, RejectionReason, SnapshotSources};
pub use stats::{revenue_trend, DashboardStats, RevenuePoint};
pub use synthesis::{
    next_rent_due, synthesize, DeadlineKind, OccupancyState, PropertyStatus, Synthesis,
    SynthesisTotals, UpcomingDeadline, UrgentAction,
};
