//! Mock portfolio reader shared by the handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Notify, Semaphore};

use crate::domain::foundation::{OwnerId, PropertyId};
use crate::domain::portfolio::{
    ListingStatus, MaintenanceStats, OccupancyRecord, PaymentStatus, Property, RentPayment,
};
use crate::ports::{PortfolioError, PortfolioReader};

#[derive(Default)]
pub struct MockPortfolioReader {
    pub properties: Vec<Property>,
    pub occupancies: Vec<OccupancyRecord>,
    pub payments: Vec<RentPayment>,
    pub maintenance: HashMap<PropertyId, MaintenanceStats>,
    pub pending: u32,
    /// Name of the query that should fail.
    pub fail_on: Option<&'static str>,
    /// When set, `list_properties` waits for a permit before answering.
    pub gate: Option<Arc<Semaphore>>,
    pub started: Arc<Notify>,
    pub property_calls: AtomicUsize,
}

impl MockPortfolioReader {
    /// Two properties, one occupied with a 300 overdue payment.
    pub fn scenario() -> Self {
        let first = Property::new("Canal House", "Ghent", 1000.0).with_status(ListingStatus::Published);
        let second = Property::new("Studio", "Ghent", 800.0).with_status(ListingStatus::Draft);
        Self {
            occupancies: vec![OccupancyRecord::new(first.id)],
            payments: vec![RentPayment::new(
                first.id,
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                300.0,
                PaymentStatus::Overdue,
            )],
            properties: vec![first, second],
            pending: 2,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, query: &'static str) -> Self {
        self.fail_on = Some(query);
        self
    }

    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn check(&self, query: &'static str) -> Result<(), PortfolioError> {
        if self.fail_on == Some(query) {
            return Err(PortfolioError::Database(format!("Simulated {} failure", query)));
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioReader for MockPortfolioReader {
    async fn list_properties(&self, _owner_id: &OwnerId) -> Result<Vec<Property>, PortfolioError> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.map_err(|e| PortfolioError::Database(e.to_string()))?;
        }
        self.check("properties")?;
        Ok(self.properties.clone())
    }

    async fn list_occupancies(
        &self,
        _property_ids: &[PropertyId],
    ) -> Result<Vec<OccupancyRecord>, PortfolioError> {
        self.check("occupancies")?;
        Ok(self.occupancies.clone())
    }

    async fn list_rent_payments(
        &self,
        _property_ids: &[PropertyId],
    ) -> Result<Vec<RentPayment>, PortfolioError> {
        self.check("payments")?;
        Ok(self.payments.clone())
    }

    async fn maintenance_stats(
        &self,
        _property_ids: &[PropertyId],
    ) -> Result<HashMap<PropertyId, MaintenanceStats>, PortfolioError> {
        self.check("maintenance")?;
        Ok(self.maintenance.clone())
    }

    async fn count_pending_applications(
        &self,
        _property_ids: &[PropertyId],
    ) -> Result<u32, PortfolioError> {
        self.check("applications")?;
        Ok(self.pending)
    }
}

pub fn owner() -> OwnerId {
    OwnerId::new("owner-123").unwrap()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}
