//! Batch-join of flat record collections by property.
//!
//! Every collection is walked exactly once to build a per-property lookup,
//! so correlating records with properties stays linear in the total record
//! count rather than properties × records.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::NaiveDate;

use super::records::{MaintenanceStats, OccupancyRecord, RentPayment};
use super::snapshot::PortfolioSnapshot;
use crate::domain::foundation::PropertyId;

/// Number of most recent payments considered for overdue rent.
pub const RECENT_PAYMENT_WINDOW: usize = 3;

/// Groups `records` by `key` in one pass, keeping input order inside each group.
pub fn group_by_key<T, K, F>(records: impl IntoIterator<Item = T>, key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for record in records {
        groups.entry(key(&record)).or_default().push(record);
    }
    groups
}

/// Per-property lookups built once per synthesis pass.
#[derive(Debug)]
pub struct BatchIndex<'a> {
    occupancy: HashMap<PropertyId, Vec<&'a OccupancyRecord>>,
    payments: HashMap<PropertyId, Vec<&'a RentPayment>>,
    maintenance: &'a HashMap<PropertyId, MaintenanceStats>,
}

impl<'a> BatchIndex<'a> {
    /// Builds the index. Payments are ordered newest month first before
    /// grouping; payments without a month sort last.
    pub fn build(snapshot: &'a PortfolioSnapshot) -> Self {
        let mut payments: Vec<&RentPayment> = snapshot.payments().iter().collect();
        payments.sort_by(|a, b| b.month.cmp(&a.month));

        Self {
            occupancy: group_by_key(snapshot.occupancies(), |r| r.property_id),
            payments: group_by_key(payments, |p| p.property_id),
            maintenance: snapshot.maintenance(),
        }
    }

    pub fn is_occupied(&self, property_id: &PropertyId) -> bool {
        self.occupancy.contains_key(property_id)
    }

    /// Property ids with at least one occupancy record.
    pub fn occupied_ids(&self) -> HashSet<PropertyId> {
        self.occupancy.keys().copied().collect()
    }

    /// Earliest known move-out date among the property's tenancies.
    pub fn earliest_move_out(&self, property_id: &PropertyId) -> Option<NaiveDate> {
        self.occupancy
            .get(property_id)?
            .iter()
            .filter_map(|record| record.move_out_date)
            .min()
    }

    /// Most recent payments, newest first, capped at [`RECENT_PAYMENT_WINDOW`].
    pub fn recent_payments(&self, property_id: &PropertyId) -> &[&'a RentPayment] {
        match self.payments.get(property_id) {
            Some(payments) => &payments[..payments.len().min(RECENT_PAYMENT_WINDOW)],
            None => &[],
        }
    }

    pub fn maintenance(&self, property_id: &PropertyId) -> Option<&'a MaintenanceStats> {
        self.maintenance.get(property_id)
    }
}
