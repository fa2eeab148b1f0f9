//! Legal-move enumeration and the advisor seam.
//!
//! `available_moves` lists every move the player could make right now,
//! including the melds already formable from the hand. The enumeration is
//! also packaged, together with the public table facts, into an
//! [`AdvisorContext`] for an external hint provider. The engine never
//! interprets an advisor's answer; the context is a one-way export.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Card, Rank, Seat, Suit};
use crate::melds::{self, Meld};
use crate::state::{GameState, GameStatus, TurnPhase};

/// One move the player could legally make in the current phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateMove {
    DrawClosed,
    DrawOpen { card: Card },
    Discard { index: usize, card: Card },
    Meld { cards: Vec<Card> },
}

/// Enumerate the player's legal moves.
///
/// Empty when the game is over or it is the bot's turn. Melds are listed
/// in every phase; draw and discard follow the phase.
#[must_use]
pub fn available_moves(state: &GameState) -> Vec<CandidateMove> {
    if state.status != GameStatus::Active || state.current_player != Seat::Player {
        return Vec::new();
    }

    let mut moves = Vec::new();
    match state.phase {
        TurnPhase::AwaitingDraw => {
            moves.push(CandidateMove::DrawClosed);
            if let Some(card) = state.piles.open_top() {
                moves.push(CandidateMove::DrawOpen { card });
            }
        }
        TurnPhase::AwaitingDiscard => {
            for (index, &card) in state.player_hand.iter().enumerate() {
                moves.push(CandidateMove::Discard { index, card });
            }
        }
    }
    for cards in candidate_melds(&state.player_hand, state.wild_rank()) {
        moves.push(CandidateMove::Meld { cards });
    }
    moves
}

/// Card groups in `hand` that already classify as melds.
///
/// Sets are every rank with three or four distinct suits present; runs are
/// the maximal same-suit stretches of consecutive ranks, three cards or
/// longer. Joker substitutions are not explored, the enumeration stays
/// linear in the hand.
#[must_use]
pub fn candidate_melds(hand: &[Card], wild_rank: Rank) -> Vec<Vec<Card>> {
    let mut found = Vec::new();

    // Sets: bucket non-jokers by rank, keep one card per suit.
    let mut by_rank: FxHashMap<Rank, SmallVec<[Card; 4]>> = FxHashMap::default();
    for &card in hand {
        if melds::is_joker(card, wild_rank) {
            continue;
        }
        let bucket = by_rank.entry(card.rank).or_default();
        if !bucket.iter().any(|c| c.suit == card.suit) {
            bucket.push(card);
        }
    }
    let mut sets: Vec<Vec<Card>> = by_rank
        .into_values()
        .filter(|bucket| bucket.len() >= 3)
        .map(|bucket| bucket.into_vec())
        .collect();
    for set in &mut sets {
        set.sort_by_key(|card| card.id);
    }
    sets.sort_by_key(|set| set[0].id);
    found.extend(sets);

    // Runs: per suit, walk the sorted distinct ranks for maximal stretches.
    for suit in Suit::STANDARD {
        let mut suited: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|card| card.suit == suit && !melds::is_joker(*card, wild_rank))
            .collect();
        suited.sort_by_key(|card| card.rank.sequence_value());
        suited.dedup_by_key(|card| card.rank);

        let mut start = 0;
        for end in 1..=suited.len() {
            let contiguous = end < suited.len()
                && suited[end].rank.sequence_value()
                    == suited[end - 1].rank.sequence_value().map(|v| v + 1);
            if !contiguous {
                if end - start >= 3 {
                    found.push(suited[start..end].to_vec());
                }
                start = end;
            }
        }
    }

    debug_assert!(found
        .iter()
        .all(|cards| melds::classify(cards, wild_rank).is_some()));
    found
}

/// Everything an external advisor is allowed to see.
#[derive(Clone, Debug)]
pub struct AdvisorContext {
    pub hand: Vec<Card>,
    pub open_top: Option<Card>,
    pub wild_joker: Card,
    pub melds: Vec<Meld>,
    pub candidate_moves: Vec<CandidateMove>,
}

/// Package the player's decision context for an advisor.
#[must_use]
pub fn advisor_context(state: &GameState) -> AdvisorContext {
    AdvisorContext {
        hand: state.player_hand.clone(),
        open_top: state.piles.open_top(),
        wild_joker: state.wild_joker,
        melds: state.player_melds.clone(),
        candidate_moves: available_moves(state),
    }
}
