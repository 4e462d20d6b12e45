//! DashboardRefresher - Coordinates dashboard refreshes per owner.
//!
//! Each owner has one slot holding the last complete dashboard. A refresh
//! replaces the whole view model or nothing: a failed pass leaves the prior
//! view in place. A refresh requested while another one for the same owner
//! is running is not queued; the caller gets the last complete view back
//! with [`RefreshOutcome::InFlight`].
//!
//! Invalidation bumps the slot generation. A pass that started under an
//! older generation read data from before the invalidation and is never
//! stored. Slots are only created by refreshes, and at most `max_owners`
//! are kept; the least recently used idle slot is evicted first.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use super::get_owner_dashboard::{GetOwnerDashboardHandler, GetOwnerDashboardQuery};
use crate::domain::foundation::OwnerId;
use crate::domain::portfolio::OwnerDashboard;
use crate::ports::PortfolioError;

/// Owners whose dashboards are kept when no capacity is given.
pub const DEFAULT_MAX_OWNERS: usize = 1024;

/// What happened to a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// A new pass completed and replaced the view.
    Refreshed,
    /// Another pass for the owner is running; nothing was started.
    InFlight,
}

/// Result of a refresh request.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub outcome: RefreshOutcome,
    /// Latest complete view, if any pass has ever completed.
    pub dashboard: Option<Arc<OwnerDashboard>>,
}

#[derive(Default)]
struct SlotState {
    view: Option<Arc<OwnerDashboard>>,
    generation: u64,
}

#[derive(Default)]
struct OwnerSlot {
    running: Mutex<()>,
    state: RwLock<SlotState>,
    last_used: AtomicU64,
}

/// Caches owner dashboards and serializes their refreshes.
pub struct DashboardRefresher {
    handler: GetOwnerDashboardHandler,
    slots: Mutex<HashMap<OwnerId, Arc<OwnerSlot>>>,
    max_owners: usize,
    clock: AtomicU64,
}

impl DashboardRefresher {
    pub fn new(handler: GetOwnerDashboardHandler) -> Self {
        Self::with_capacity(handler, DEFAULT_MAX_OWNERS)
    }

    pub fn with_capacity(handler: GetOwnerDashboardHandler, max_owners: usize) -> Self {
        Self {
            handler,
            slots: Mutex::new(HashMap::new()),
            max_owners: max_owners.max(1),
            clock: AtomicU64::new(0),
        }
    }

    fn touch(&self, slot: &OwnerSlot) {
        let now = self.clock.fetch_add(1, Ordering::Relaxed);
        slot.last_used.store(now, Ordering::Relaxed);
    }

    async fn existing_slot(&self, owner_id: &OwnerId) -> Option<Arc<OwnerSlot>> {
        let slots = self.slots.lock().await;
        let slot = slots.get(owner_id).cloned()?;
        self.touch(&slot);
        Some(slot)
    }

    async fn slot_for_refresh(&self, owner_id: &OwnerId) -> Arc<OwnerSlot> {
        let mut slots = self.slots.lock().await;
        if let Some(slot) = slots.get(owner_id).cloned() {
            self.touch(&slot);
            return slot;
        }

        if slots.len() >= self.max_owners {
            // Only the map holds an idle slot, and new handles are cloned under this lock.
            let idle = slots
                .iter()
                .filter(|(_, slot)| Arc::strong_count(slot) == 1)
                .min_by_key(|(_, slot)| slot.last_used.load(Ordering::Relaxed))
                .map(|(owner, _)| owner.clone());
            if let Some(evicted) = idle {
                slots.remove(&evicted);
                tracing::debug!(owner_id = %evicted, "Evicted idle dashboard slot");
            }
        }

        let slot = Arc::new(OwnerSlot::default());
        self.touch(&slot);
        slots.insert(owner_id.clone(), slot.clone());
        slot
    }

    /// Returns the last complete view without starting a pass.
    pub async fn cached(&self, owner_id: &OwnerId) -> Option<Arc<OwnerDashboard>> {
        let slot = self.existing_slot(owner_id).await?;
        let state = slot.state.read().await;
        state.view.clone()
    }

    /// Returns the cached view for `query.as_of`, deriving one first if the
    /// cache is empty or was evaluated against another day.
    pub async fn current(
        &self,
        query: GetOwnerDashboardQuery,
    ) -> Result<Option<Arc<OwnerDashboard>>, PortfolioError> {
        let cached = self.cached(&query.owner_id).await;
        if let Some(view) = cached.filter(|view| view.as_of == query.as_of) {
            return Ok(Some(view));
        }
        Ok(self.refresh(query).await?.dashboard)
    }

    /// Starts a pass unless one is already running for the owner.
    pub async fn refresh(&self, query: GetOwnerDashboardQuery) -> Result<RefreshResult, PortfolioError> {
        let slot = self.slot_for_refresh(&query.owner_id).await;

        let Ok(_running) = slot.running.try_lock() else {
            tracing::debug!(owner_id = %query.owner_id, "Dashboard refresh already in flight");
            let state = slot.state.read().await;
            return Ok(RefreshResult {
                outcome: RefreshOutcome::InFlight,
                dashboard: state.view.clone(),
            });
        };

        let started_at = slot.state.read().await.generation;
        let owner_id = query.owner_id.clone();
        match self.handler.handle(query).await {
            Ok(dashboard) => {
                let dashboard = Arc::new(dashboard);
                let mut state = slot.state.write().await;
                if state.generation == started_at {
                    state.view = Some(dashboard.clone());
                    tracing::info!(owner_id = %owner_id, "Dashboard refreshed");
                } else {
                    tracing::debug!(owner_id = %owner_id, "Dashboard invalidated during refresh, not stored");
                }
                Ok(RefreshResult {
                    outcome: RefreshOutcome::Refreshed,
                    dashboard: Some(dashboard),
                })
            }
            Err(err) => {
                tracing::warn!(owner_id = %owner_id, error = %err, "Dashboard refresh failed, keeping previous view");
                Err(err)
            }
        }
    }

    /// Drops the cached view so the next read derives a fresh one. A pass
    /// already running for the owner will not store its result.
    pub async fn invalidate(&self, owner_id: &OwnerId) {
        let Some(slot) = self.existing_slot(owner_id).await else {
            return;
        };
        let mut state = slot.state.write().await;
        state.generation += 1;
        state.view = None;
    }

    /// Number of owners currently holding a slot.
    pub async fn tracked_owners(&self) -> usize {
        self.slots.lock().await.len()
    }
}
