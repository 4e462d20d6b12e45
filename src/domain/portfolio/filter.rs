//! Filter and sort engine for the portfolio grid.
//!
//! Stateless: every call starts from the full listing collection and the
//! filter value, so re-running it on each keystroke is safe.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classifier::{classify_health, HealthSignals, PropertyHealth};
use super::records::{ListingStatus, Property};
use crate::domain::foundation::PropertyId;

/// A property together with its tenancy state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub property: Property,
    pub occupied: bool,
    pub health: PropertyHealth,
}

impl PropertyListing {
    /// Joins properties with the set of occupied ids, classifying each once.
    pub fn from_properties(
        properties: &[Property],
        occupied: &HashSet<PropertyId>,
        as_of: NaiveDate,
    ) -> Vec<Self> {
        properties
            .iter()
            .map(|property| {
                let is_occupied = occupied.contains(&property.id);
                Self {
                    health: classify_health(&HealthSignals::for_property(property, is_occupied, as_of)),
                    occupied: is_occupied,
                    property: property.clone(),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
    Archived,
    /// Has a tenant, whatever the listing says.
    Rented,
    /// Has no tenant, whatever the listing says.
    Vacant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthFilter {
    #[default]
    All,
    Excellent,
    Attention,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Created,
    Rent,
    Views,
    Inquiries,
    Name,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter and sort settings chosen in the portfolio grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub health: HealthFilter,
    pub city: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl PropertyFilter {
    fn matches(&self, listing: &PropertyListing, needle: Option<&str>) -> bool {
        let property = &listing.property;

        if let Some(needle) = needle {
            let hit = property.title.to_lowercase().contains(needle)
                || property.city.to_lowercase().contains(needle)
                || property
                    .address
                    .as_deref()
                    .is_some_and(|address| address.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }

        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Published => property.status == ListingStatus::Published,
            StatusFilter::Draft => property.status == ListingStatus::Draft,
            StatusFilter::Archived => property.status == ListingStatus::Archived,
            StatusFilter::Rented => listing.occupied,
            StatusFilter::Vacant => !listing.occupied,
        };
        if !status_ok {
            return false;
        }

        let health_ok = match self.health {
            HealthFilter::All => true,
            HealthFilter::Excellent => listing.health == PropertyHealth::Excellent,
            HealthFilter::Attention => listing.health == PropertyHealth::Attention,
            HealthFilter::Critical => listing.health == PropertyHealth::Critical,
        };
        if !health_ok {
            return false;
        }

        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            if property.city != city {
                return false;
            }
        }

        if self.min_rent.is_some_and(|min| property.monthly_rent < min) {
            return false;
        }
        if self.max_rent.is_some_and(|max| property.monthly_rent > max) {
            return false;
        }

        true
    }

    fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let ordering = match self.sort_by {
            SortField::Created => created_millis(a).cmp(&created_millis(b)),
            SortField::Rent => a.monthly_rent.total_cmp(&b.monthly_rent),
            SortField::Views => a.views_count.cmp(&b.views_count),
            SortField::Inquiries => a.inquiries_count.cmp(&b.inquiries_count),
            SortField::Name => compare_text(&a.title, &b.title),
            SortField::City => compare_text(&a.city, &b.city),
        };
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Applies `filter` to `listings` and returns the matching listings in order.
pub fn filter_and_sort(listings: &[PropertyListing], filter: &PropertyFilter) -> Vec<PropertyListing> {
    let needle = filter
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<PropertyListing> = listings
        .iter()
        .filter(|listing| filter.matches(listing, needle.as_deref()))
        .cloned()
        .collect();

    matched.sort_by(|a, b| filter.compare(&a.property, &b.property));
    matched
}

/// Missing creation time sorts as the epoch.
fn created_millis(property: &Property) -> i64 {
    property
        .created_at
        .map(|ts| ts.timestamp_millis())
        .unwrap_or(0)
}

/// Case-insensitive collation with a byte-order tie-break.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;
