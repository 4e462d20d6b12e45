//! Immutable input snapshot for one synthesis pass.
//!
//! All collections are materialized before the pass starts. Ingestion
//! rejects records that would silently corrupt the aggregates (duplicate
//! property ids, negative or non-finite money) and reports them.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::records::{MaintenanceStats, OccupancyRecord, Property, RentPayment};
use crate::domain::foundation::PropertyId;

/// Raw collections as fetched from the data source.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSources {
    pub properties: Vec<Property>,
    pub occupancies: Vec<OccupancyRecord>,
    pub payments: Vec<RentPayment>,
    pub maintenance: HashMap<PropertyId, MaintenanceStats>,
    pub pending_applications: u32,
}

/// Why a record was kept out of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    DuplicatePropertyId,
    InvalidRent,
    InvalidPaymentAmount,
}

/// A record dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    pub property_id: PropertyId,
    pub reason: RejectionReason,
}

/// Validated, read-only view of a portfolio at one point in time.
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    properties: Vec<Property>,
    occupancies: Vec<OccupancyRecord>,
    payments: Vec<RentPayment>,
    maintenance: HashMap<PropertyId, MaintenanceStats>,
    pending_applications: u32,
    rejected: Vec<RejectedRecord>,
}

impl PortfolioSnapshot {
    /// Validates the sources and freezes them into a snapshot.
    ///
    /// Property order is preserved; the first occurrence of a duplicated id wins.
    pub fn ingest(sources: SnapshotSources) -> Self {
        let mut rejected = Vec::new();
        let mut seen = HashSet::with_capacity(sources.properties.len());

        let properties: Vec<Property> = sources
            .properties
            .into_iter()
            .filter(|property| {
                if !seen.insert(property.id) {
                    rejected.push(RejectedRecord {
                        property_id: property.id,
                        reason: RejectionReason::DuplicatePropertyId,
                    });
                    return false;
                }
                if !is_valid_money(property.monthly_rent) {
                    rejected.push(RejectedRecord {
                        property_id: property.id,
                        reason: RejectionReason::InvalidRent,
                    });
                    return false;
                }
                true
            })
            .collect();

        let payments: Vec<RentPayment> = sources
            .payments
            .into_iter()
            .filter(|payment| {
                let valid = is_valid_money(payment.amount);
                if !valid {
                    rejected.push(RejectedRecord {
                        property_id: payment.property_id,
                        reason: RejectionReason::InvalidPaymentAmount,
                    });
                }
                valid
            })
            .collect();

        for record in &rejected {
            tracing::warn!(
                property_id = %record.property_id,
                reason = ?record.reason,
                "Rejected record during portfolio ingestion"
            );
        }

        Self {
            properties,
            occupancies: sources.occupancies,
            payments,
            maintenance: sources.maintenance,
            pending_applications: sources.pending_applications,
            rejected,
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn occupancies(&self) -> &[OccupancyRecord] {
        &self.occupancies
    }

    pub fn payments(&self) -> &[RentPayment] {
        &self.payments
    }

    pub fn maintenance(&self) -> &HashMap<PropertyId, MaintenanceStats> {
        &self.maintenance
    }

    pub fn pending_applications(&self) -> u32 {
        self.pending_applications
    }

    /// Records dropped during ingestion, in the order they were found.
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }
}

fn is_valid_money(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}
