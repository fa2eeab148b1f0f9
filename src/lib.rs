//! # rummy-engine
//!
//! A 13-card rummy rule engine with an async game service around it.
//!
//! ## Architecture
//!
//! - **Pure core, async shell**: everything below [`service`] is
//!   synchronous and deterministic. The service owns the per-game locking,
//!   the delayed bot reply, and the collaborator hooks.
//!
//! - **Seeded randomness**: shuffles and the wild-joker pick run on a
//!   seeded `ChaCha8` rng stored in the game state, so a seed replays a
//!   whole game.
//!
//! - **Conservation**: the 54 card ids are partitioned across the piles,
//!   hands, and melds at all times; the engine asserts this after every
//!   transition in debug builds.
//!
//! ## Modules
//!
//! - `core`: cards, seats, draw sources, the seeded RNG
//! - `deck`: the double pile (closed stock and open discard) and dealing
//! - `melds`: sequence and set validation with wild and printed jokers
//! - `scoring`: hand point totals and the declaration gate
//! - `state`: per-game state, the move ledger, the redacted player view
//! - `engine`: turn transitions, the bot opponent, move enumeration
//! - `service`: concurrent session registry, delayed bot scheduling,
//!   statistics and persistence seams

pub mod core;
pub mod deck;
pub mod engine;
pub mod melds;
pub mod scoring;
pub mod service;
pub mod state;

pub use crate::core::{Card, CardId, DrawSource, GameRng, GameRngState, Rank, Seat, Suit};

pub use crate::deck::{DeckError, Piles, DECK_SIZE, HAND_SIZE};

pub use crate::melds::{Meld, MeldKind};

pub use crate::scoring::DeclareVeto;

pub use crate::state::{
    GameId, GameState, GameStatus, HistoryEntry, MoveAction, MoveLog, PlayerView, TurnPhase,
};

pub use crate::engine::{
    AdvisorContext, BotMove, BotOutcome, CandidateMove, GameError,
};

pub use crate::service::{
    GameArchive, GameService, GameSession, GameStore, GameSummary, InMemoryStore, StatisticsSink,
    DEFAULT_BOT_DELAY,
};
