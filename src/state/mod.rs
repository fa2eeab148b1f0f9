//! Per-game state: hands, melds, piles, turn bookkeeping, history.
//!
//! ## Lifecycle
//!
//! A `GameState` is created once per game id by [`GameState::new`] (which
//! deals the table) and mutated exclusively through the transition functions
//! in [`crate::engine`]. Once `status` is `Completed` no transition accepts
//! it again; read-only queries remain valid.
//!
//! ## Conservation
//!
//! At every observable point the 54 card ids are present exactly once
//! across the two piles, the two hands, and all accepted melds. Melded
//! cards move out of the hand when the meld is accepted, so the census has
//! no double counting. [`GameState::conservation_holds`] checks the
//! invariant and the engine `debug_assert!`s it after every transition.

pub mod history;
pub mod snapshot;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::{Card, GameRng, Rank, Seat};
use crate::deck::{self, Piles, DECK_SIZE};
use crate::melds::Meld;
use crate::scoring;

pub use history::{HistoryEntry, MoveAction, MoveLog};
pub use snapshot::PlayerView;

/// Unique game identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Allocate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Whether the game is still accepting moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Completed,
}

/// Sub-phase of the human player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingDraw,
    AwaitingDiscard,
}

/// Full state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameId,
    pub player_name: String,

    pub player_hand: Vec<Card>,
    pub bot_hand: Vec<Card>,
    pub player_melds: Vec<Meld>,
    pub bot_melds: Vec<Meld>,

    pub piles: Piles,
    /// Fixed at deal time for the lifetime of the game.
    pub wild_joker: Card,

    pub current_player: Seat,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub winner: Option<Seat>,

    pub history: MoveLog,
    pub rng: GameRng,

    pub created_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
}

impl GameState {
    /// Deal a fresh game. The player always moves first.
    #[must_use]
    pub fn new(id: GameId, player_name: impl Into<String>, mut rng: GameRng) -> Self {
        let dealt = deck::deal(&mut rng);
        Self {
            id,
            player_name: player_name.into(),
            player_hand: dealt.player_hand,
            bot_hand: dealt.bot_hand,
            player_melds: Vec::new(),
            bot_melds: Vec::new(),
            piles: dealt.piles,
            wild_joker: dealt.wild_joker,
            current_player: Seat::Player,
            phase: TurnPhase::AwaitingDraw,
            status: GameStatus::Active,
            winner: None,
            history: MoveLog::new(),
            rng,
            created_at: OffsetDateTime::now_utc(),
            ended_at: None,
        }
    }

    /// The rank that acts as wild for this game.
    #[must_use]
    pub fn wild_rank(&self) -> Rank {
        self.wild_joker.rank
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, seat: Seat) -> &[Card] {
        match seat {
            Seat::Player => &self.player_hand,
            Seat::Bot => &self.bot_hand,
        }
    }

    pub(crate) fn hand_mut(&mut self, seat: Seat) -> &mut Vec<Card> {
        match seat {
            Seat::Player => &mut self.player_hand,
            Seat::Bot => &mut self.bot_hand,
        }
    }

    /// A seat's accepted melds.
    #[must_use]
    pub fn melds(&self, seat: Seat) -> &[Meld] {
        match seat {
            Seat::Player => &self.player_melds,
            Seat::Bot => &self.bot_melds,
        }
    }

    pub(crate) fn melds_mut(&mut self, seat: Seat) -> &mut Vec<Meld> {
        match seat {
            Seat::Player => &mut self.player_melds,
            Seat::Bot => &mut self.bot_melds,
        }
    }

    /// Unmelded point total for a seat.
    #[must_use]
    pub fn score(&self, seat: Seat) -> u32 {
        scoring::hand_score(self.hand(seat), self.melds(seat), self.wild_rank())
    }

    /// Record a move in the ledger.
    pub(crate) fn record(&mut self, seat: Seat, action: MoveAction) {
        self.history.push(seat, action);
    }

    /// The most recent move, if any.
    #[must_use]
    pub fn last_move(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Wall-clock duration of a completed game.
    #[must_use]
    pub fn duration(&self) -> Option<time::Duration> {
        self.ended_at.map(|end| end - self.created_at)
    }

    /// Verify the conservation invariant: 54 distinct card ids across the
    /// piles, hands, and melds, each present exactly once.
    #[must_use]
    pub fn conservation_holds(&self) -> bool {
        let mut seen = FxHashSet::default();
        let mut total = 0usize;

        let piles = self.piles.closed.iter().chain(self.piles.open.iter());
        let hands = self.player_hand.iter().chain(self.bot_hand.iter());
        let melds = self
            .player_melds
            .iter()
            .chain(self.bot_melds.iter())
            .flat_map(|meld| meld.cards.iter());

        for card in piles.chain(hands).chain(melds) {
            total += 1;
            if !seen.insert(card.id) {
                return false;
            }
        }

        total == DECK_SIZE
    }
}
