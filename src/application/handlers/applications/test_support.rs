//! Mock application repository shared by the pipeline handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::domain::applications::{ApplicationCard, ApplicationStatus};
use crate::domain::foundation::{ApplicationId, OwnerId, PropertyId};
use crate::ports::{ApplicationError, ApplicationRepository};

#[derive(Default)]
pub struct MockApplicationRepository {
    cards: Mutex<Vec<ApplicationCard>>,
    updates: Mutex<Vec<(ApplicationId, ApplicationStatus)>>,
    should_fail: bool,
    read_barrier: Option<Arc<Barrier>>,
}

impl MockApplicationRepository {
    pub fn with_cards(cards: Vec<ApplicationCard>) -> Self {
        Self {
            cards: Mutex::new(cards),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Holds each board read until `parties` readers have taken their copy.
    pub fn synchronized_reads(mut self, parties: usize) -> Self {
        self.read_barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn updates(&self) -> Vec<(ApplicationId, ApplicationStatus)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn status_of(&self, id: ApplicationId) -> Option<ApplicationStatus> {
        self.cards.lock().unwrap().iter().find(|c| c.id == id).map(|c| c.status)
    }
}

#[async_trait]
impl ApplicationRepository for MockApplicationRepository {
    async fn list_for_owner(&self, _owner_id: &OwnerId) -> Result<Vec<ApplicationCard>, ApplicationError> {
        if self.should_fail {
            return Err(ApplicationError::Database("Simulated failure".to_string()));
        }
        let cards = self.cards.lock().unwrap().clone();
        if let Some(barrier) = &self.read_barrier {
            barrier.wait().await;
        }
        Ok(cards)
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<(), ApplicationError> {
        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApplicationError::NotFound(id))?;
        if card.status != from {
            return Err(ApplicationError::stale_status(id, from, card.status));
        }
        card.status = to;
        self.updates.lock().unwrap().push((id, to));
        Ok(())
    }
}

pub fn owner() -> OwnerId {
    OwnerId::new("owner-123").unwrap()
}

/// One pending, one reviewing and one approved card.
pub fn board_cards() -> Vec<ApplicationCard> {
    let property = PropertyId::new();
    vec![
        ApplicationCard::new(property, "Ada"),
        ApplicationCard::new(property, "Ben").with_status(ApplicationStatus::Reviewing),
        ApplicationCard::new(property, "Cleo").with_status(ApplicationStatus::Approved),
    ]
}
