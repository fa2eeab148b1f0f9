//! Collaborator seams: statistics and persistence.
//!
//! Both traits are optional plugins on the service. The engine never calls
//! them; the service invokes them at well-defined points (after mutating a
//! game, and once when a game completes). Failures inside a collaborator
//! must not fail the player's move, so the hook methods are infallible
//! from the service's point of view and implementations log their own
//! errors.

use async_trait::async_trait;

use crate::core::Seat;
use crate::state::{GameId, GameState};

/// One completed game, condensed for a statistics consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub game_id: GameId,
    pub player_name: String,
    pub winner: Option<Seat>,
    pub player_score: u32,
    pub bot_score: u32,
    pub total_moves: usize,
    pub duration: Option<time::Duration>,
}

impl GameSummary {
    /// Condense a finished game.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self {
            game_id: state.id,
            player_name: state.player_name.clone(),
            winner: state.winner,
            player_score: state.score(Seat::Player),
            bot_score: state.score(Seat::Bot),
            total_moves: state.history.len(),
            duration: state.duration(),
        }
    }
}

/// Receives a summary once per completed game.
#[async_trait]
pub trait StatisticsSink: Send + Sync {
    async fn on_game_completed(&self, summary: GameSummary);
}

/// Durable storage for game states.
///
/// `save` is called after every successful mutation so the archive can
/// survive a process restart; `load` backs [`super::GameService::restore`].
#[async_trait]
pub trait GameArchive: Send + Sync {
    async fn save(&self, state: &GameState);
    async fn load(&self, id: GameId) -> Option<GameState>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::state::GameStatus;
    use time::OffsetDateTime;

    #[test]
    fn test_summary_of_completed_game() {
        let mut state = GameState::new(GameId::new(), "summ", GameRng::new(42));
        state.status = GameStatus::Completed;
        state.winner = Some(Seat::Player);
        state.ended_at = Some(OffsetDateTime::now_utc());

        let summary = GameSummary::of(&state);
        assert_eq!(summary.game_id, state.id);
        assert_eq!(summary.player_name, "summ");
        assert_eq!(summary.winner, Some(Seat::Player));
        assert_eq!(summary.total_moves, 0);
        assert!(summary.duration.is_some());
    }
}
