//! Concurrent game service.
//!
//! One [`GameSession`] per live game: the state behind an async mutex plus
//! a cancellation token for the session's deferred bot move. All writes to
//! a game go through its mutex, so each game is single-writer while
//! different games run fully in parallel through the shared registry.
//!
//! The bot's reply to a discard is not played inline. The service spawns a
//! task that waits out the configured delay, then takes the lock and asks
//! the bot to move; the bot itself re-checks whose turn it is under the
//! lock, so a stale wakeup (the game was declared or deleted in between)
//! is a no-op.

pub mod hooks;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::{CardId, DrawSource, GameRng, Seat};
use crate::engine::{self, AdvisorContext, BotOutcome, CandidateMove, GameError};
use crate::melds::Meld;
use crate::state::{GameId, GameState, GameStatus, PlayerView};

pub use hooks::{GameArchive, GameSummary, StatisticsSink};
pub use store::{GameStore, InMemoryStore};

/// Bot reply delay matching the original pacing.
pub const DEFAULT_BOT_DELAY: Duration = Duration::from_millis(1000);

/// A live game: its state and the handle to its pending bot move.
#[derive(Debug)]
pub struct GameSession {
    pub id: GameId,
    pub state: Mutex<GameState>,
    bot_cancel: CancellationToken,
}

impl GameSession {
    /// Wrap an existing state in a session.
    #[must_use]
    pub fn from_state(state: GameState) -> Arc<Self> {
        Arc::new(Self {
            id: state.id,
            state: Mutex::new(state),
            bot_cancel: CancellationToken::new(),
        })
    }
}

/// Front door for everything game-related.
pub struct GameService {
    store: Arc<dyn GameStore>,
    stats: Option<Arc<dyn StatisticsSink>>,
    archive: Option<Arc<dyn GameArchive>>,
    bot_delay: Duration,
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}

impl GameService {
    /// Service over a fresh in-memory registry, no collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    /// Service over a caller-provided registry.
    #[must_use]
    pub fn with_store(store: Arc<dyn GameStore>) -> Self {
        Self {
            store,
            stats: None,
            archive: None,
            bot_delay: DEFAULT_BOT_DELAY,
        }
    }

    /// Attach a statistics consumer.
    #[must_use]
    pub fn with_statistics(mut self, stats: Arc<dyn StatisticsSink>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Attach a persistence backend.
    #[must_use]
    pub fn with_archive(mut self, archive: Arc<dyn GameArchive>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Override the bot reply delay. Tests use a short one.
    #[must_use]
    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.bot_delay = delay;
        self
    }

    /// Number of live sessions.
    #[must_use]
    pub fn active_games(&self) -> usize {
        self.store.len()
    }

    fn session(&self, id: GameId) -> Result<Arc<GameSession>, GameError> {
        self.store.get(id).ok_or(GameError::GameNotFound(id))
    }

    async fn persist(&self, state: &GameState) {
        if let Some(archive) = &self.archive {
            archive.save(state).await;
        }
    }

    /// Deal a new game with a random seed.
    pub async fn create_game(&self, player_name: impl Into<String>) -> PlayerView {
        self.create_game_seeded(player_name, GameRng::from_entropy()).await
    }

    /// Deal a new game with a caller-chosen rng, for reproducible games.
    pub async fn create_game_seeded(
        &self,
        player_name: impl Into<String>,
        rng: GameRng,
    ) -> PlayerView {
        let state = GameState::new(GameId::new(), player_name, rng);
        info!(game = %state.id, player = %state.player_name, "game created");

        let view = PlayerView::of(&state);
        self.persist(&state).await;
        self.store.insert(GameSession::from_state(state));
        view
    }

    /// Current view of a game.
    pub async fn view(&self, id: GameId) -> Result<PlayerView, GameError> {
        let session = self.session(id)?;
        let state = session.state.lock().await;
        Ok(PlayerView::of(&state))
    }

    /// Player draws from the chosen pile.
    pub async fn draw(&self, id: GameId, source: DrawSource) -> Result<PlayerView, GameError> {
        let session = self.session(id)?;
        let mut state = session.state.lock().await;

        let card = engine::draw(&mut state, source)?;
        debug!(game = %id, %card, ?source, "player drew");

        self.persist(&state).await;
        Ok(PlayerView::of(&state))
    }

    /// Player discards the card at `index`; the bot's reply is scheduled
    /// after the configured delay.
    pub async fn discard(&self, id: GameId, index: usize) -> Result<PlayerView, GameError> {
        let session = self.session(id)?;
        let mut state = session.state.lock().await;

        let card = engine::discard(&mut state, index)?;
        debug!(game = %id, %card, "player discarded");

        self.persist(&state).await;
        let view = PlayerView::of(&state);
        drop(state);

        self.schedule_bot_move(session);
        Ok(view)
    }

    /// Player lays down a meld from hand.
    pub async fn form_meld(&self, id: GameId, card_ids: &[CardId]) -> Result<Meld, GameError> {
        let session = self.session(id)?;
        let mut state = session.state.lock().await;

        let meld = engine::form_meld(&mut state, Seat::Player, card_ids)?;
        debug!(game = %id, kind = %meld.kind, cards = meld.cards.len(), "meld accepted");

        self.persist(&state).await;
        Ok(meld)
    }

    /// Player declares. On success the game is finished for good: the
    /// pending bot move is cancelled and the collaborators are notified.
    pub async fn declare(&self, id: GameId) -> Result<GameSummary, GameError> {
        let session = self.session(id)?;
        let mut state = session.state.lock().await;

        engine::declare(&mut state)?;
        session.bot_cancel.cancel();

        self.persist(&state).await;
        let summary = GameSummary::of(&state);
        drop(state);

        info!(game = %id, score = summary.player_score, "player declared");
        if let Some(stats) = &self.stats {
            stats.on_game_completed(summary.clone()).await;
        }
        Ok(summary)
    }

    /// Legal moves for the player right now.
    pub async fn available_moves(&self, id: GameId) -> Result<Vec<CandidateMove>, GameError> {
        let session = self.session(id)?;
        let state = session.state.lock().await;
        Ok(engine::available_moves(&state))
    }

    /// Decision context for an external advisor.
    pub async fn advisor_context(&self, id: GameId) -> Result<AdvisorContext, GameError> {
        let session = self.session(id)?;
        let state = session.state.lock().await;
        Ok(engine::advisor_context(&state))
    }

    /// Drop a game from the registry, cancelling any pending bot move.
    /// Returns whether the game existed.
    pub async fn remove_game(&self, id: GameId) -> bool {
        match self.store.remove(id) {
            Some(session) => {
                session.bot_cancel.cancel();
                info!(game = %id, "game removed");
                true
            }
            None => false,
        }
    }

    /// Bring an archived game back into the registry. If the game went
    /// down mid bot turn, the bot move is rescheduled.
    pub async fn restore(&self, id: GameId) -> Result<PlayerView, GameError> {
        let archive = self.archive.as_ref().ok_or(GameError::GameNotFound(id))?;
        let state = archive.load(id).await.ok_or(GameError::GameNotFound(id))?;

        let view = PlayerView::of(&state);
        let bot_due = state.status == GameStatus::Active && state.current_player == Seat::Bot;
        let session = GameSession::from_state(state);
        self.store.insert(Arc::clone(&session));
        info!(game = %id, "game restored");

        if bot_due {
            self.schedule_bot_move(session);
        }
        Ok(view)
    }

    fn schedule_bot_move(&self, session: Arc<GameSession>) {
        let delay = self.bot_delay;
        let archive = self.archive.clone();
        let token = session.bot_cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => return,
                () = tokio::time::sleep(delay) => {}
            }

            let mut state = session.state.lock().await;
            match engine::bot_turn(&mut state) {
                Ok(BotOutcome::Played(played)) => {
                    debug!(game = %session.id, discarded = %played.discarded, "bot replied");
                    if let Some(archive) = &archive {
                        archive.save(&state).await;
                    }
                }
                Ok(BotOutcome::Skipped) => {
                    debug!(game = %session.id, "bot wakeup was stale");
                }
                Err(err) => {
                    warn!(game = %session.id, %err, "bot could not move");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_game_is_reported() {
        let service = GameService::new();
        let id = GameId::new();

        assert_eq!(service.view(id).await.unwrap_err(), GameError::GameNotFound(id));
        assert_eq!(
            service.draw(id, DrawSource::Closed).await.unwrap_err(),
            GameError::GameNotFound(id)
        );
        assert!(!service.remove_game(id).await);
    }

    #[tokio::test]
    async fn test_create_registers_a_session() {
        let service = GameService::new();
        let view = service.create_game_seeded("alice", GameRng::new(42)).await;

        assert_eq!(service.active_games(), 1);
        assert_eq!(view.player_hand.len(), 13);
        assert_eq!(view.player_name, "alice");

        let again = service.view(view.game_id).await.unwrap();
        assert_eq!(again.player_hand, view.player_hand);
    }

    #[tokio::test]
    async fn test_remove_forgets_the_game() {
        let service = GameService::new();
        let view = service.create_game_seeded("bob", GameRng::new(1)).await;

        assert!(service.remove_game(view.game_id).await);
        assert_eq!(service.active_games(), 0);
        assert_eq!(
            service.view(view.game_id).await.unwrap_err(),
            GameError::GameNotFound(view.game_id)
        );
    }
}
