//! Session registry.
//!
//! The default store is an in-process concurrent map; the trait exists so a
//! deployment can swap in a sharded or externally backed registry without
//! touching the service.

use std::sync::Arc;

use dashmap::DashMap;

use crate::state::GameId;

use super::GameSession;

/// Registry of live game sessions.
pub trait GameStore: Send + Sync {
    fn insert(&self, session: Arc<GameSession>);
    fn get(&self, id: GameId) -> Option<Arc<GameSession>>;
    fn remove(&self, id: GameId) -> Option<Arc<GameSession>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock-free in-memory registry.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    games: DashMap<GameId, Arc<GameSession>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryStore {
    fn insert(&self, session: Arc<GameSession>) {
        self.games.insert(session.id, session);
    }

    fn get(&self, id: GameId) -> Option<Arc<GameSession>> {
        self.games.get(&id).map(|entry| Arc::clone(&entry))
    }

    fn remove(&self, id: GameId) -> Option<Arc<GameSession>> {
        self.games.remove(&id).map(|(_, session)| session)
    }

    fn len(&self) -> usize {
        self.games.len()
    }
}
