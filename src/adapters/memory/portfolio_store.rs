//! In-Memory Portfolio Store
//!
//! Holds properties, tenancies, payments, maintenance counters and tenant
//! applications in memory. Backs demo mode and the integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::applications::{ApplicationCard, ApplicationStatus};
use crate::domain::foundation::{ApplicationId, OwnerId, PropertyId};
use crate::domain::portfolio::{MaintenanceStats, OccupancyRecord, Property, RentPayment};
use crate::ports::{
    ApplicationError, ApplicationRepository, PortfolioError, PortfolioReader,
};

#[derive(Debug, Default)]
struct StoreState {
    properties: Vec<Property>,
    occupancies: Vec<OccupancyRecord>,
    payments: Vec<RentPayment>,
    maintenance: HashMap<PropertyId, MaintenanceStats>,
    applications: Vec<ApplicationCard>,
}

impl StoreState {
    fn owned_property_ids(&self, owner_id: &OwnerId) -> HashSet<PropertyId> {
        self.properties
            .iter()
            .filter(|p| p.owner_id.as_ref() == Some(owner_id))
            .map(|p| p.id)
            .collect()
    }
}

/// In-memory implementation of the portfolio ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolioStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_property(&self, property: Property) {
        self.state.write().await.properties.push(property);
    }

    pub async fn add_occupancy(&self, occupancy: OccupancyRecord) {
        self.state.write().await.occupancies.push(occupancy);
    }

    pub async fn add_payment(&self, payment: RentPayment) {
        self.state.write().await.payments.push(payment);
    }

    pub async fn set_maintenance(&self, property_id: PropertyId, stats: MaintenanceStats) {
        self.state.write().await.maintenance.insert(property_id, stats);
    }

    pub async fn add_application(&self, application: ApplicationCard) {
        self.state.write().await.applications.push(application);
    }

    pub async fn property_count(&self) -> usize {
        self.state.read().await.properties.len()
    }
}

#[async_trait]
impl PortfolioReader for InMemoryPortfolioStore {
    async fn list_properties(&self, owner_id: &OwnerId) -> Result<Vec<Property>, PortfolioError> {
        let state = self.state.read().await;
        Ok(state
            .properties
            .iter()
            .filter(|p| p.owner_id.as_ref() == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn list_occupancies(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<OccupancyRecord>, PortfolioError> {
        let wanted: HashSet<&PropertyId> = property_ids.iter().collect();
        let state = self.state.read().await;
        Ok(state
            .occupancies
            .iter()
            .filter(|o| wanted.contains(&o.property_id))
            .cloned()
            .collect())
    }

    async fn list_rent_payments(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<RentPayment>, PortfolioError> {
        let wanted: HashSet<&PropertyId> = property_ids.iter().collect();
        let state = self.state.read().await;
        Ok(state
            .payments
            .iter()
            .filter(|p| wanted.contains(&p.property_id))
            .cloned()
            .collect())
    }

    async fn maintenance_stats(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, MaintenanceStats>, PortfolioError> {
        let state = self.state.read().await;
        Ok(property_ids
            .iter()
            .filter_map(|id| state.maintenance.get(id).map(|stats| (*id, stats.clone())))
            .collect())
    }

    async fn count_pending_applications(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<u32, PortfolioError> {
        let wanted: HashSet<&PropertyId> = property_ids.iter().collect();
        let state = self.state.read().await;
        let count = state
            .applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Pending && wanted.contains(&a.property_id))
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryPortfolioStore {
    async fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<ApplicationCard>, ApplicationError> {
        let state = self.state.read().await;
        let owned = state.owned_property_ids(owner_id);
        let mut cards: Vec<ApplicationCard> = state
            .applications
            .iter()
            .filter(|a| owned.contains(&a.property_id))
            .cloned()
            .collect();
        cards.sort_by_key(|a| a.submitted_at);
        Ok(cards)
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<(), ApplicationError> {
        let mut state = self.state.write().await;
        let card = state
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ApplicationError::NotFound(id))?;
        if card.status != from {
            return Err(ApplicationError::stale_status(id, from, card.status));
        }
        card.status = to;
        Ok(())
    }
}
