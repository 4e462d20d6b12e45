//! Source records consumed by the derivation engine.
//!
//! These mirror the rows handed over by the persistence collaborator. Every
//! field a row may omit carries a serde default so that one incomplete record
//! degrades to zeros and "no date" instead of failing the whole snapshot.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::PropertyHealth;
use crate::domain::foundation::{OwnerId, PropertyId};

/// Listing visibility of a property. Independent of actual tenancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Published,
    #[default]
    Draft,
    Archived,
    Rented,
    #[serde(other)]
    Unknown,
}

impl ListingStatus {
    /// Draft and archived listings are not visible to prospective tenants.
    pub fn is_hidden(&self) -> bool {
        matches!(self, ListingStatus::Draft | ListingStatus::Archived)
    }
}

/// A rental property as listed by its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub monthly_rent: f64,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub inquiries_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Date the last tenancy ended, when known.
    #[serde(default)]
    pub vacant_since: Option<NaiveDate>,
    #[serde(default)]
    pub main_image: Option<String>,
    /// Manual health override set by the owner.
    #[serde(default)]
    pub health: Option<PropertyHealth>,
}

impl Property {
    /// Creates a draft property with the given title, city and rent.
    pub fn new(title: impl Into<String>, city: impl Into<String>, monthly_rent: f64) -> Self {
        Self {
            id: PropertyId::new(),
            owner_id: None,
            title: title.into(),
            city: city.into(),
            address: None,
            status: ListingStatus::default(),
            monthly_rent,
            bedrooms: 0,
            bathrooms: 0,
            views_count: 0,
            inquiries_count: 0,
            created_at: None,
            vacant_since: None,
            main_image: None,
            health: None,
        }
    }

    pub fn with_id(mut self, id: PropertyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_vacant_since(mut self, date: NaiveDate) -> Self {
        self.vacant_since = Some(date);
        self
    }

    pub fn with_counters(mut self, views: u64, inquiries: u64) -> Self {
        self.views_count = views;
        self.inquiries_count = inquiries;
        self
    }

    pub fn with_health_override(mut self, health: PropertyHealth) -> Self {
        self.health = Some(health);
        self
    }
}

/// Evidence of a tenancy on a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub property_id: PropertyId,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub move_out_date: Option<NaiveDate>,
}

impl OccupancyRecord {
    pub fn new(property_id: PropertyId) -> Self {
        Self {
            property_id,
            move_in_date: None,
            move_out_date: None,
        }
    }

    pub fn moving_out(mut self, date: NaiveDate) -> Self {
        self.move_out_date = Some(date);
        self
    }
}

/// Settlement state of a monthly rent payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    #[serde(other)]
    Other,
}

/// One month of rent owed on a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPayment {
    pub property_id: PropertyId,
    /// First day of the billed month.
    #[serde(default)]
    pub month: Option<NaiveDate>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl RentPayment {
    pub fn new(property_id: PropertyId, month: NaiveDate, amount: f64, status: PaymentStatus) -> Self {
        Self {
            property_id,
            month: Some(month),
            amount,
            status,
        }
    }
}

/// Maintenance ticket counts aggregated upstream for one property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceStats {
    #[serde(default)]
    pub open_count: u32,
    #[serde(default)]
    pub in_progress_count: u32,
    #[serde(default)]
    pub by_priority: HashMap<String, u32>,
}

impl MaintenanceStats {
    /// Priority bucket that counts as urgent.
    pub const URGENT_PRIORITY: &'static str = "high";

    /// Tickets still being worked on (open plus in progress).
    pub fn open_total(&self) -> u32 {
        self.open_count + self.in_progress_count
    }

    pub fn urgent_count(&self) -> u32 {
        self.by_priority
            .get(Self::URGENT_PRIORITY)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_missing_numeric_fields_default_to_zero() {
        let id = PropertyId::new();
        let property: Property = serde_json::from_value(json!({
            "id": id,
            "title": "Loft",
            "status": "published"
        }))
        .unwrap();

        assert_eq!(property.monthly_rent, 0.0);
        assert_eq!(property.views_count, 0);
        assert_eq!(property.created_at, None);
        assert_eq!(property.status, ListingStatus::Published);
    }

    #[test]
    fn unknown_listing_status_does_not_fail_deserialization() {
        let status: ListingStatus = serde_json::from_str("\"under_renovation\"").unwrap();
        assert_eq!(status, ListingStatus::Unknown);
    }

    #[test]
    fn unknown_payment_status_maps_to_other() {
        let status: PaymentStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, PaymentStatus::Other);
    }

    #[test]
    fn payment_without_month_has_no_date() {
        let payment: RentPayment = serde_json::from_value(json!({
            "property_id": PropertyId::new(),
            "status": "overdue"
        }))
        .unwrap();
        assert_eq!(payment.month, None);
        assert_eq!(payment.amount, 0.0);
    }

    #[test]
    fn maintenance_open_total_sums_open_and_in_progress() {
        let stats = MaintenanceStats {
            open_count: 2,
            in_progress_count: 3,
            by_priority: HashMap::new(),
        };
        assert_eq!(stats.open_total(), 5);
    }

    #[test]
    fn maintenance_urgent_count_reads_high_bucket_only() {
        let stats = MaintenanceStats {
            open_count: 4,
            in_progress_count: 0,
            by_priority: HashMap::from([("high".to_string(), 2), ("low".to_string(), 2)]),
        };
        assert_eq!(stats.urgent_count(), 2);
        assert_eq!(MaintenanceStats::default().urgent_count(), 0);
    }

    #[test]
    fn hidden_listings_are_draft_and_archived() {
        assert!(ListingStatus::Draft.is_hidden());
        assert!(ListingStatus::Archived.is_hidden());
        assert!(!ListingStatus::Published.is_hidden());
        assert!(!ListingStatus::Rented.is_hidden());
    }
}
