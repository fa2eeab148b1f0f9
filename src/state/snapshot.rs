//! Redacted, serializable snapshot of a game for the player's side.
//!
//! The transport layer never sees the raw `GameState` (which contains the
//! bot's hand and the stock order); it gets a `PlayerView` with the bot's
//! private information reduced to counts.

use serde::{Deserialize, Serialize};

use crate::core::{Card, Seat};
use crate::melds::Meld;
use crate::state::{GameId, GameState, GameStatus, HistoryEntry, TurnPhase};

/// What the human player is allowed to see.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    pub game_id: GameId,
    pub player_name: String,

    pub player_hand: Vec<Card>,
    pub player_melds: Vec<Meld>,
    pub player_score: u32,

    /// The full discard pile is public.
    pub open_deck: Vec<Card>,
    /// Only the size of the stock is public.
    pub closed_deck_count: usize,
    pub wild_joker: Card,

    pub current_player: Seat,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub winner: Option<Seat>,

    pub bot_hand_count: usize,
    pub bot_meld_count: usize,

    pub last_move: Option<HistoryEntry>,
}

impl PlayerView {
    /// Project a view from the full state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self {
            game_id: state.id,
            player_name: state.player_name.clone(),
            player_hand: state.player_hand.clone(),
            player_melds: state.player_melds.clone(),
            player_score: state.score(Seat::Player),
            open_deck: state.piles.open.clone(),
            closed_deck_count: state.piles.closed.len(),
            wild_joker: state.wild_joker,
            current_player: state.current_player,
            phase: state.phase,
            status: state.status,
            winner: state.winner,
            bot_hand_count: state.bot_hand.len(),
            bot_meld_count: state.bot_melds.len(),
            last_move: state.last_move().cloned(),
        }
    }
}
