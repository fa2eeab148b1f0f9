//! Hand scoring and declaration eligibility.
//!
//! Points count against the holder: the score of a hand is the sum of the
//! values of its unmelded cards, with jokers (printed or wild) scoring zero
//! wherever they sit. A declaration is legal only when nothing unmelded
//! remains and the melds carry at least one pure sequence and two sequences
//! in total.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::{Card, CardId, Rank};
use crate::melds::{is_joker, Meld, MeldKind};

/// Why a declaration was refused. The `Display` strings are the caller-facing
/// reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DeclareVeto {
    #[error("unmelded cards remain")]
    UnmeldedCardsRemain,
    #[error("no pure sequence")]
    NoPureSequence,
    #[error("fewer than two sequences")]
    TooFewSequences,
}

fn melded_ids(melds: &[Meld]) -> FxHashSet<CardId> {
    melds
        .iter()
        .flat_map(|meld| meld.cards.iter().map(|card| card.id))
        .collect()
}

/// Point total of the unmelded portion of a hand.
///
/// Melded cards normally live outside the hand, but any overlap by id is
/// subtracted defensively. Jokers score zero regardless of location.
#[must_use]
pub fn hand_score(hand: &[Card], melds: &[Meld], wild_rank: Rank) -> u32 {
    let melded = melded_ids(melds);
    hand.iter()
        .filter(|card| !melded.contains(&card.id))
        .filter(|&&card| !is_joker(card, wild_rank))
        .map(|card| u32::from(card.value()))
        .sum()
}

/// Whether a hand may declare, given its accepted melds.
///
/// Checks, in order: no unmelded remainder, at least one pure sequence,
/// at least two sequences in total. Melds keep the classification they were
/// accepted with; they are never re-validated here.
pub fn can_declare(hand: &[Card], melds: &[Meld]) -> Result<(), DeclareVeto> {
    let melded = melded_ids(melds);
    if hand.iter().any(|card| !melded.contains(&card.id)) {
        return Err(DeclareVeto::UnmeldedCardsRemain);
    }

    if !melds
        .iter()
        .any(|meld| meld.kind == MeldKind::Sequence && meld.pure)
    {
        return Err(DeclareVeto::NoPureSequence);
    }

    let sequences = melds
        .iter()
        .filter(|meld| meld.kind == MeldKind::Sequence)
        .count();
    if sequences < 2 {
        return Err(DeclareVeto::TooFewSequences);
    }

    Ok(())
}
