//! Portfolio-wide statistics folded from the synthesis totals.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use super::synthesis::SynthesisTotals;
use crate::domain::foundation::Percentage;

/// Months shown in the revenue trend, current month included.
pub const REVENUE_TREND_MONTHS: usize = 6;

/// Collection ratios for the months preceding the current one, oldest first.
///
/// Placeholder values until payment history is aggregated.
const TREND_COLLECTION_RATIOS: [f64; REVENUE_TREND_MONTHS - 1] = [0.92, 0.95, 0.88, 0.97, 0.94];

/// Headline numbers for the owner dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_properties: usize,
    pub occupied_properties: usize,
    /// Complement of `occupied_properties`, not a recount by listing status.
    pub vacant_properties: usize,
    pub occupation_rate: Percentage,
    pub total_expected: f64,
    pub total_collected: f64,
    pub total_revenue: f64,
    pub overdue_amount: f64,
    pub overdue_payments: usize,
    pub open_maintenance: u32,
    pub urgent_maintenance: u32,
    pub expiring_leases: usize,
    pub pending_applications: u32,
}

impl DashboardStats {
    /// Folds the pass totals into dashboard statistics.
    pub fn from_totals(totals: &SynthesisTotals, pending_applications: u32) -> Self {
        let collected = totals.total_expected - totals.overdue_amount;
        Self {
            total_properties: totals.property_count,
            occupied_properties: totals.occupied_count,
            vacant_properties: totals.property_count - totals.occupied_count,
            occupation_rate: Percentage::from_ratio(totals.occupied_count, totals.property_count),
            total_expected: totals.total_expected,
            total_collected: collected,
            total_revenue: collected,
            overdue_amount: totals.overdue_amount,
            overdue_payments: totals.overdue_payments,
            open_maintenance: totals.open_maintenance,
            urgent_maintenance: totals.urgent_maintenance,
            expiring_leases: totals.expiring_leases,
            pending_applications,
        }
    }
}

/// One month of the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// First day of the month.
    pub month: NaiveDate,
    pub expected: f64,
    pub collected: f64,
}

/// Builds the revenue trend ending with the month of `as_of`.
///
/// The last point carries the actual collected amount; earlier points apply
/// fixed ratios to the current expected total. `collected` never exceeds
/// `expected` and never drops below zero.
pub fn revenue_trend(stats: &DashboardStats, as_of: NaiveDate) -> Vec<RevenuePoint> {
    let Some(current) = as_of.with_day(1) else {
        return Vec::new();
    };
    let expected = stats.total_expected;

    TREND_COLLECTION_RATIOS
        .iter()
        .map(|ratio| expected * ratio)
        .chain(std::iter::once(stats.total_collected))
        .enumerate()
        .filter_map(|(i, collected)| {
            let back = (REVENUE_TREND_MONTHS - 1 - i) as u32;
            let month = current.checked_sub_months(Months::new(back))?;
            Some(RevenuePoint {
                month,
                expected,
                collected: collected.clamp(0.0, expected.max(0.0)),
            })
        })
        .collect()
}
