//! Deterministic ordering of synthesized actions and deadlines.
//!
//! Both sorts are stable, so ties keep synthesis order.

use super::synthesis::{UpcomingDeadline, UrgentAction};

/// Number of deadlines shown on the dashboard.
pub const DEADLINE_DISPLAY_LIMIT: usize = 5;

/// Orders actions critical first, then warning, then info.
pub fn rank_actions(mut actions: Vec<UrgentAction>) -> Vec<UrgentAction> {
    actions.sort_by_key(|action| action.severity);
    actions
}

/// Orders deadlines soonest first and keeps at most `limit` of them.
///
/// Truncation happens after sorting.
pub fn rank_deadlines(mut deadlines: Vec<UpcomingDeadline>, limit: usize) -> Vec<UpcomingDeadline> {
    deadlines.sort_by_key(|deadline| deadline.date);
    deadlines.truncate(limit);
    deadlines
}
