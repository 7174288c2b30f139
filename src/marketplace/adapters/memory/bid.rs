//! In-memory bid repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::marketplace::{
    domain::{Bid, BidId, TaskId},
    ports::{BidRepository, BidRepositoryError, BidRepositoryResult},
};

/// Thread-safe in-memory bid repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBidRepository {
    state: Arc<RwLock<InMemoryBidState>>,
}

#[derive(Debug, Default)]
struct InMemoryBidState {
    bids: HashMap<BidId, Bid>,
    task_index: HashMap<TaskId, Vec<BidId>>,
    bidder_index: HashMap<UserId, Vec<BidId>>,
}

impl InMemoryBidRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> BidRepositoryError {
    BidRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Helper to look up bids through a secondary index.
fn collect_by_index<K: std::hash::Hash + Eq>(
    state: &InMemoryBidState,
    index: &HashMap<K, Vec<BidId>>,
    key: &K,
) -> Vec<Bid> {
    index
        .get(key)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.bids.get(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl BidRepository for InMemoryBidRepository {
    async fn store(&self, bid: &Bid) -> BidRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.bids.contains_key(&bid.id()) {
            return Err(BidRepositoryError::DuplicateBid(bid.id()));
        }
        state.task_index.entry(bid.task_id()).or_default().push(bid.id());
        state
            .bidder_index
            .entry(bid.bidder_id())
            .or_default()
            .push(bid.id());
        state.bids.insert(bid.id(), bid.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BidId) -> BidRepositoryResult<Option<Bid>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.bids.get(&id).cloned())
    }

    async fn list_for_task(&self, task_id: TaskId) -> BidRepositoryResult<Vec<Bid>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut bids = collect_by_index(&state, &state.task_index, &task_id);
        bids.sort_by_key(|bid| (bid.created_at(), bid.id()));
        Ok(bids)
    }

    async fn list_for_bidder(&self, bidder_id: UserId) -> BidRepositoryResult<Vec<Bid>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(collect_by_index(&state, &state.bidder_index, &bidder_id))
    }

    async fn update_many(&self, bids: &[Bid]) -> BidRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        // Verify the whole batch before touching anything so the write is
        // all-or-nothing.
        for bid in bids {
            if !state.bids.contains_key(&bid.id()) {
                return Err(BidRepositoryError::NotFound(bid.id()));
            }
        }
        for bid in bids {
            state.bids.insert(bid.id(), bid.clone());
        }
        Ok(())
    }
}
