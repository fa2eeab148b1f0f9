//! Heuristic opponent.
//!
//! The bot plays one complete turn in a single transition: draw from the
//! stock, then discard the highest-value card in its hand. Deliberately
//! simple; the seams for a stronger opponent are [`crate::engine::moves`]
//! and the advisor context, not this function.

use tracing::debug;

use crate::core::{Card, DrawSource, Seat};
use crate::state::{GameState, GameStatus, MoveAction, TurnPhase};

use super::error::GameError;

/// What the bot did on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotMove {
    pub drawn: Card,
    pub discarded: Card,
}

/// Result of asking the bot to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotOutcome {
    /// The bot drew and discarded.
    Played(BotMove),
    /// It was not the bot's turn, or the game is over. Nothing changed.
    Skipped,
}

/// Play the bot's turn if it is due.
///
/// Idempotent when the turn is not the bot's: callers race-check under the
/// session lock by calling this and treating `Skipped` as a no-op. A stock
/// that cannot be replenished surfaces as `DeckExhausted` with the state
/// untouched.
pub fn bot_turn(state: &mut GameState) -> Result<BotOutcome, GameError> {
    if state.status != GameStatus::Active || state.current_player != Seat::Bot {
        return Ok(BotOutcome::Skipped);
    }

    let drawn = state.piles.draw_closed(&mut state.rng)?;
    state.bot_hand.push(drawn);
    state.record(
        Seat::Bot,
        MoveAction::Draw {
            source: DrawSource::Closed,
            card: drawn.id,
        },
    );

    // Highest-value card goes; ties break to the earliest position.
    let index = state
        .bot_hand
        .iter()
        .enumerate()
        .max_by_key(|(i, card)| (card.value(), std::cmp::Reverse(*i)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let discarded = state.bot_hand.remove(index);
    state.piles.discard(discarded);
    state.record(Seat::Bot, MoveAction::Discard { card: discarded.id });

    state.current_player = Seat::Player;
    state.phase = TurnPhase::AwaitingDraw;

    debug!(game = %state.id, drawn = %drawn, discarded = %discarded, "bot played");
    debug_assert!(state.conservation_holds());
    Ok(BotOutcome::Played(BotMove { drawn, discarded }))
}
