//! Health and severity classification.
//!
//! Both classifiers are pure functions of their inputs. The dashboard
//! synthesizer and the portfolio filter call the same [`classify_health`],
//! so a property never shows two different tiers on two screens.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::records::{ListingStatus, Property};

/// Vacancy longer than this many days is critical.
pub const VACANCY_CRITICAL_DAYS: i64 = 30;

/// Vacancy longer than this many days needs attention.
pub const VACANCY_ATTENTION_DAYS: i64 = 14;

/// Expiring leases at or under this many days are critical.
pub const LEASE_CRITICAL_DAYS: i64 = 14;

/// Owner-facing tier summarizing a property's operational state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyHealth {
    Excellent,
    Attention,
    Critical,
}

/// Inputs the health rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSignals {
    pub override_health: Option<PropertyHealth>,
    pub occupied: bool,
    pub listing: ListingStatus,
    pub vacancy_days: i64,
}

impl HealthSignals {
    /// Collects the signals for `property` as seen on `as_of`.
    pub fn for_property(property: &Property, occupied: bool, as_of: NaiveDate) -> Self {
        Self {
            override_health: property.health,
            occupied,
            listing: property.status,
            vacancy_days: vacancy_age_days(property, as_of),
        }
    }
}

/// Days the property has been without a tenant.
///
/// Counts from `vacant_since`, falling back to the listing creation date.
/// Unknown or future dates count as zero.
pub fn vacancy_age_days(property: &Property, as_of: NaiveDate) -> i64 {
    let since = property
        .vacant_since
        .or_else(|| property.created_at.map(|ts| ts.date_naive()));

    since
        .map(|date| (as_of - date).num_days().max(0))
        .unwrap_or(0)
}

/// Classifies a property. The first matching rule wins.
pub fn classify_health(signals: &HealthSignals) -> PropertyHealth {
    if let Some(health) = signals.override_health {
        return health;
    }
    if signals.occupied {
        return PropertyHealth::Excellent;
    }
    if signals.listing.is_hidden() {
        return PropertyHealth::Attention;
    }
    if signals.vacancy_days > VACANCY_CRITICAL_DAYS {
        PropertyHealth::Critical
    } else if signals.vacancy_days > VACANCY_ATTENTION_DAYS {
        PropertyHealth::Attention
    } else {
        PropertyHealth::Excellent
    }
}

/// Urgency tier of a synthesized action. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Kinds of urgent action the dashboard can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OverdueRent,
    UrgentMaintenance,
    ExpiringLease,
    PendingApplication,
}

/// Severity assigned to an action at synthesis time.
///
/// `days_remaining` only matters for expiring leases; without it an
/// expiring lease is a warning.
pub fn action_severity(kind: ActionKind, days_remaining: Option<i64>) -> Severity {
    match kind {
        ActionKind::OverdueRent => Severity::Critical,
        ActionKind::UrgentMaintenance => Severity::Warning,
        ActionKind::PendingApplication => Severity::Info,
        ActionKind::ExpiringLease => match days_remaining {
            Some(days) if days <= LEASE_CRITICAL_DAYS => Severity::Critical,
            _ => Severity::Warning,
        },
    }
}
