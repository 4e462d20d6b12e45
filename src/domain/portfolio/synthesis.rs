//! Urgent action and deadline synthesis.
//!
//! One pass over the snapshot's properties. Each property is derived
//! independently from the batch index, then folded into an accumulator that
//! carries the running totals. Nothing produced here is mutated afterwards.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use super::classifier::{
    action_severity, classify_health, ActionKind, HealthSignals, PropertyHealth, Severity,
};
use super::grouping::BatchIndex;
use super::records::{ListingStatus, PaymentStatus, Property};
use super::snapshot::PortfolioSnapshot;
use crate::domain::foundation::PropertyId;

/// Leases ending further out than this are not tracked.
pub const LEASE_HORIZON_DAYS: i64 = 120;

/// Leases ending within this many days raise an action and a deadline.
pub const LEASE_ALERT_DAYS: i64 = 30;

/// Day of month rent falls due.
pub const RENT_DUE_DAY: u32 = 5;

/// An actionable card on the owner dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentAction {
    pub kind: ActionKind,
    pub severity: Severity,
    /// `None` for portfolio-wide actions.
    pub property_id: Option<PropertyId>,
    pub property_title: Option<String>,
    pub description: String,
    pub amount: Option<f64>,
    pub days_remaining: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    RentDue,
    LeaseExpiry,
}

/// A dated obligation shown in the upcoming deadlines panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDeadline {
    pub kind: DeadlineKind,
    pub date: NaiveDate,
    pub amount: Option<f64>,
    pub property_id: PropertyId,
    pub property_title: String,
}

/// Actual tenancy state, decoupled from listing visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyState {
    Occupied,
    Vacant,
    Pending,
}

/// Render-ready card data for one property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStatus {
    pub property_id: PropertyId,
    pub title: String,
    pub city: String,
    pub listing_status: ListingStatus,
    pub monthly_rent: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub views_count: u64,
    pub inquiries_count: u64,
    pub main_image: Option<String>,
    pub occupancy: OccupancyState,
    pub health: PropertyHealth,
    pub has_overdue_rent: bool,
    pub overdue_amount: f64,
    pub open_maintenance: u32,
    pub urgent_maintenance: u32,
    /// Days until the earliest move-out, when within the tracking horizon.
    pub days_until_lease_end: Option<i64>,
}

/// Running totals folded across the property pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisTotals {
    pub property_count: usize,
    pub occupied_count: usize,
    pub total_expected: f64,
    pub overdue_amount: f64,
    /// Number of payment records that contributed to `overdue_amount`.
    pub overdue_payments: usize,
    pub open_maintenance: u32,
    pub urgent_maintenance: u32,
    pub expiring_leases: usize,
}

/// Result of a complete synthesis pass, in synthesis order (unranked).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesis {
    pub statuses: Vec<PropertyStatus>,
    pub actions: Vec<UrgentAction>,
    pub deadlines: Vec<UpcomingDeadline>,
    pub totals: SynthesisTotals,
}

/// Everything derived from a single property.
#[derive(Debug, Clone, PartialEq)]
struct PropertyDerivation {
    status: PropertyStatus,
    actions: Vec<UrgentAction>,
    deadlines: Vec<UpcomingDeadline>,
    overdue_payments: usize,
    lease_alert: bool,
}

impl Synthesis {
    fn absorb(mut self, derived: PropertyDerivation) -> Self {
        let status = &derived.status;
        let totals = &mut self.totals;
        totals.property_count += 1;
        if status.occupancy == OccupancyState::Occupied {
            totals.occupied_count += 1;
        }
        totals.total_expected += status.monthly_rent;
        totals.overdue_amount += status.overdue_amount;
        totals.overdue_payments += derived.overdue_payments;
        totals.open_maintenance += status.open_maintenance;
        totals.urgent_maintenance += status.urgent_maintenance;
        if derived.lease_alert {
            totals.expiring_leases += 1;
        }

        self.actions.extend(derived.actions);
        self.deadlines.extend(derived.deadlines);
        self.statuses.push(derived.status);
        self
    }
}

/// Runs the synthesis pass over `snapshot` as seen on `as_of`.
pub fn synthesize(snapshot: &PortfolioSnapshot, as_of: NaiveDate) -> Synthesis {
    let index = BatchIndex::build(snapshot);

    let mut synthesis = snapshot
        .properties()
        .iter()
        .map(|property| derive_property(property, &index, as_of))
        .fold(Synthesis::default(), Synthesis::absorb);

    let pending = snapshot.pending_applications();
    if pending > 0 {
        synthesis.actions.push(UrgentAction {
            kind: ActionKind::PendingApplication,
            severity: action_severity(ActionKind::PendingApplication, None),
            property_id: None,
            property_title: None,
            description: format!(
                "{} application{} awaiting review",
                pending,
                if pending == 1 { "" } else { "s" }
            ),
            amount: None,
            days_remaining: None,
        });
    }

    synthesis
}

fn derive_property(property: &Property, index: &BatchIndex<'_>, as_of: NaiveDate) -> PropertyDerivation {
    let mut actions = Vec::new();
    let mut deadlines = Vec::new();

    let occupied = index.is_occupied(&property.id);
    let occupancy = if occupied {
        OccupancyState::Occupied
    } else if property.status == ListingStatus::Published {
        OccupancyState::Vacant
    } else {
        OccupancyState::Pending
    };

    let (overdue_amount, overdue_payments) = index
        .recent_payments(&property.id)
        .iter()
        .filter(|payment| payment.status == PaymentStatus::Overdue)
        .fold((0.0, 0usize), |(sum, count), payment| (sum + payment.amount, count + 1));

    if overdue_amount > 0.0 {
        actions.push(UrgentAction {
            kind: ActionKind::OverdueRent,
            severity: action_severity(ActionKind::OverdueRent, None),
            property_id: Some(property.id),
            property_title: Some(property.title.clone()),
            description: format!("Overdue rent of {:.2} on {}", overdue_amount, property.title),
            amount: Some(overdue_amount),
            days_remaining: None,
        });
    }

    let maintenance = index.maintenance(&property.id);
    let open_maintenance = maintenance.map(|m| m.open_total()).unwrap_or(0);
    let urgent_maintenance = maintenance.map(|m| m.urgent_count()).unwrap_or(0);

    if urgent_maintenance > 0 {
        actions.push(UrgentAction {
            kind: ActionKind::UrgentMaintenance,
            severity: action_severity(ActionKind::UrgentMaintenance, None),
            property_id: Some(property.id),
            property_title: Some(property.title.clone()),
            description: format!(
                "{} urgent maintenance request{} on {}",
                urgent_maintenance,
                if urgent_maintenance == 1 { "" } else { "s" },
                property.title
            ),
            amount: None,
            days_remaining: None,
        });
    }

    let days_until_lease_end = index
        .earliest_move_out(&property.id)
        .map(|date| (date, (date - as_of).num_days()))
        .filter(|(_, days)| *days > 0 && *days <= LEASE_HORIZON_DAYS);

    let lease_alert = matches!(days_until_lease_end, Some((_, days)) if days <= LEASE_ALERT_DAYS);
    if let (true, Some((end_date, days))) = (lease_alert, days_until_lease_end) {
        actions.push(UrgentAction {
            kind: ActionKind::ExpiringLease,
            severity: action_severity(ActionKind::ExpiringLease, Some(days)),
            property_id: Some(property.id),
            property_title: Some(property.title.clone()),
            description: format!("Lease on {} ends in {} days", property.title, days),
            amount: None,
            days_remaining: Some(days),
        });
        deadlines.push(UpcomingDeadline {
            kind: DeadlineKind::LeaseExpiry,
            date: end_date,
            amount: None,
            property_id: property.id,
            property_title: property.title.clone(),
        });
    }

    if property.status == ListingStatus::Rented {
        if let Some(due) = next_rent_due(as_of) {
            deadlines.push(UpcomingDeadline {
                kind: DeadlineKind::RentDue,
                date: due,
                amount: Some(property.monthly_rent),
                property_id: property.id,
                property_title: property.title.clone(),
            });
        }
    }

    let health = classify_health(&HealthSignals::for_property(property, occupied, as_of));

    PropertyDerivation {
        status: PropertyStatus {
            property_id: property.id,
            title: property.title.clone(),
            city: property.city.clone(),
            listing_status: property.status,
            monthly_rent: property.monthly_rent,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            views_count: property.views_count,
            inquiries_count: property.inquiries_count,
            main_image: property.main_image.clone(),
            occupancy,
            health,
            has_overdue_rent: overdue_amount > 0.0,
            overdue_amount,
            open_maintenance,
            urgent_maintenance,
            days_until_lease_end: days_until_lease_end.map(|(_, days)| days),
        },
        actions,
        deadlines,
        overdue_payments: if overdue_amount > 0.0 { overdue_payments } else { 0 },
        lease_alert,
    }
}

/// Rent due date: the fixed due day of the month after `as_of`.
pub fn next_rent_due(as_of: NaiveDate) -> Option<NaiveDate> {
    as_of
        .with_day(1)?
        .checked_add_months(Months::new(1))?
        .with_day(RENT_DUE_DAY)
}

#[cfg(test)]
#[path = "synthesis_test.rs"]
mod synthesis_test;
