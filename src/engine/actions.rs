//! Turn-based state-machine transitions.
//!
//! All transitions are synchronous functions over `&mut GameState` with the
//! same contract: validate the turn/phase/arguments first, then mutate,
//! then append to the history ledger. A transition that returns an error
//! has not touched the state.
//!
//! The human player's turn runs draw → discard; the discard flips the turn
//! to the bot (the service layer schedules the deferred bot move). Melds
//! can be formed by either seat at any time while the game is active;
//! declaring is the player's alone.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use time::OffsetDateTime;

use crate::core::{Card, CardId, DrawSource, Seat};
use crate::melds::{self, Meld};
use crate::scoring;
use crate::state::{GameState, GameStatus, MoveAction, TurnPhase};

use super::error::GameError;

fn ensure_active(state: &GameState) -> Result<(), GameError> {
    match state.status {
        GameStatus::Active => Ok(()),
        GameStatus::Completed => Err(GameError::GameAlreadyCompleted),
    }
}

fn ensure_player_turn(state: &GameState) -> Result<(), GameError> {
    if state.current_player != Seat::Player {
        return Err(GameError::NotPlayersTurn);
    }
    Ok(())
}

/// Player draws one card from the chosen pile into their hand.
///
/// Legal only on the player's turn in the `AwaitingDraw` phase; advances
/// the phase to `AwaitingDiscard`.
pub fn draw(state: &mut GameState, source: DrawSource) -> Result<Card, GameError> {
    ensure_active(state)?;
    ensure_player_turn(state)?;
    if state.phase != TurnPhase::AwaitingDraw {
        return Err(GameError::PhaseMismatch);
    }

    let card = match source {
        DrawSource::Closed => state.piles.draw_closed(&mut state.rng)?,
        DrawSource::Open => state.piles.draw_open()?,
    };

    state.player_hand.push(card);
    state.phase = TurnPhase::AwaitingDiscard;
    state.record(Seat::Player, MoveAction::Draw { source, card: card.id });

    debug_assert!(state.conservation_holds());
    Ok(card)
}

/// Player discards the card at `index` onto the open pile.
///
/// Legal only on the player's turn in the `AwaitingDiscard` phase; flips
/// the turn to the bot.
pub fn discard(state: &mut GameState, index: usize) -> Result<Card, GameError> {
    ensure_active(state)?;
    ensure_player_turn(state)?;
    if state.phase != TurnPhase::AwaitingDiscard {
        return Err(GameError::PhaseMismatch);
    }
    if index >= state.player_hand.len() {
        return Err(GameError::InvalidCardIndex {
            index,
            hand_size: state.player_hand.len(),
        });
    }

    let card = state.player_hand.remove(index);
    state.piles.discard(card);
    state.record(Seat::Player, MoveAction::Discard { card: card.id });

    state.current_player = Seat::Bot;
    state.phase = TurnPhase::AwaitingDraw;

    debug_assert!(state.conservation_holds());
    Ok(card)
}

/// Form a meld from cards in `seat`'s hand.
///
/// Legal for either seat at any time while the game is active; there is no
/// turn check. On success the cards move out of the hand into the seat's
/// meld list, where they stay for the rest of the game.
pub fn form_meld(state: &mut GameState, seat: Seat, card_ids: &[CardId]) -> Result<Meld, GameError> {
    ensure_active(state)?;

    // Resolve ids against the hand; duplicates and misses both fail.
    let hand = state.hand(seat);
    let mut requested = FxHashSet::default();
    let mut cards: SmallVec<[Card; 4]> = SmallVec::new();
    for &id in card_ids {
        if !requested.insert(id) {
            return Err(GameError::CardsNotInHand);
        }
        let Some(card) = hand.iter().find(|card| card.id == id) else {
            return Err(GameError::CardsNotInHand);
        };
        cards.push(*card);
    }

    let meld = melds::classify(&cards, state.wild_rank()).ok_or(GameError::InvalidMeld)?;

    state.hand_mut(seat).retain(|card| !requested.contains(&card.id));
    state.melds_mut(seat).push(meld.clone());
    state.record(
        seat,
        MoveAction::Meld {
            cards: meld.cards.iter().map(|card| card.id).collect(),
            kind: meld.kind,
        },
    );

    debug_assert!(state.conservation_holds());
    Ok(meld)
}

/// Player declares, ending the game if the hand is fully and legally
/// melded.
///
/// Legal on the player's turn in any phase. On success the game becomes
/// read-only: `status = Completed`, `winner = Player`, end time stamped.
pub fn declare(state: &mut GameState) -> Result<(), GameError> {
    ensure_active(state)?;
    ensure_player_turn(state)?;

    scoring::can_declare(&state.player_hand, &state.player_melds)?;

    state.status = GameStatus::Completed;
    state.winner = Some(Seat::Player);
    state.ended_at = Some(OffsetDateTime::now_utc());
    state.record(Seat::Player, MoveAction::Declare);

    debug_assert!(state.conservation_holds());
    Ok(())
}
