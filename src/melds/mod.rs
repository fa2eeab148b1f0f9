//! Meld validation: sequences and sets.
//!
//! ## Jokers
//!
//! A card acts as a joker if it is one of the two printed jokers, or if its
//! rank matches the wild rank chosen at deal time (printed jokers never
//! match by rank since their ranks are their own). A card of the wild rank
//! always counts as a joker here, even when it could have stood for itself
//! in a run.
//!
//! ## Sequences
//!
//! A sequence needs at least three same-suit cards in one contiguous
//! ascending block of ranks (A=1 .. K=13, no wrap). Jokers fill rank gaps
//! one-for-one; leftover jokers extend the run at either end as long as the
//! block still fits inside A..K. Validation is independent of input order.
//!
//! ## Sets
//!
//! A set is 3-4 cards of one rank with pairwise-distinct suits; jokers fill
//! the remainder up to four.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, Rank, Suit};

/// Longest possible run: A through K.
const MAX_RUN: usize = 13;

/// How a meld was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldKind {
    Sequence,
    Set,
}

impl std::fmt::Display for MeldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeldKind::Sequence => write!(f, "sequence"),
            MeldKind::Set => write!(f, "set"),
        }
    }
}

/// Outcome of a successful validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeldCheck {
    /// No joker was used.
    pub pure: bool,
}

/// An accepted meld. Classified once at formation; never re-validated and
/// never removed from a player's meld list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    /// Most melds are 3-4 cards; long runs spill to the heap.
    pub cards: SmallVec<[Card; 4]>,
    pub kind: MeldKind,
    pub pure: bool,
}

/// Whether `card` acts as a joker under the given wild rank.
#[must_use]
pub fn is_joker(card: Card, wild_rank: Rank) -> bool {
    card.is_printed_joker() || (card.rank == wild_rank && card.suit != Suit::Joker)
}

/// Validate a sequence: ≥3 cards, one suit among non-jokers, contiguous
/// ascending ranks with jokers filling the gaps.
#[must_use]
pub fn validate_sequence(cards: &[Card], wild_rank: Rank) -> Option<MeldCheck> {
    if cards.len() < 3 || cards.len() > MAX_RUN {
        return None;
    }

    let mut ranks: SmallVec<[u8; 13]> = SmallVec::new();
    let mut suit: Option<Suit> = None;
    let mut jokers = 0usize;

    for &card in cards {
        if is_joker(card, wild_rank) {
            jokers += 1;
            continue;
        }
        let value = card.sequence_value()?;
        match suit {
            None => suit = Some(card.suit),
            Some(s) if s == card.suit => {}
            Some(_) => return None,
        }
        ranks.push(value);
    }

    // Nothing but jokers still forms a run of the required length.
    if ranks.is_empty() {
        return Some(MeldCheck { pure: false });
    }

    ranks.sort_unstable();
    if ranks.windows(2).any(|pair| pair[0] == pair[1]) {
        return None;
    }

    // The block must contain every real rank at its position; jokers cover
    // the `span - ranks` internal gaps, leftovers extend the ends.
    let span = (ranks[ranks.len() - 1] - ranks[0] + 1) as usize;
    if span > cards.len() {
        return None;
    }

    Some(MeldCheck { pure: jokers == 0 })
}

/// Validate a set: 3-4 cards of one rank, pairwise-distinct suits, jokers
/// filling the remainder.
#[must_use]
pub fn validate_set(cards: &[Card], wild_rank: Rank) -> Option<MeldCheck> {
    if !(3..=4).contains(&cards.len()) {
        return None;
    }

    let mut rank: Option<Rank> = None;
    let mut suits: SmallVec<[Suit; 4]> = SmallVec::new();
    let mut jokers = 0usize;

    for &card in cards {
        if is_joker(card, wild_rank) {
            jokers += 1;
            continue;
        }
        match rank {
            None => rank = Some(card.rank),
            Some(r) if r == card.rank => {}
            Some(_) => return None,
        }
        if suits.contains(&card.suit) {
            return None;
        }
        suits.push(card.suit);
    }

    Some(MeldCheck { pure: jokers == 0 })
}

/// Classify a group of cards as a meld, trying sequence before set.
///
/// Returns `None` when the cards form neither; the two can never both match
/// (a sequence needs one suit across distinct ranks, a set one rank across
/// distinct suits) except for all-joker groups, which classify as impure
/// sequences.
#[must_use]
pub fn classify(cards: &[Card], wild_rank: Rank) -> Option<Meld> {
    if let Some(check) = validate_sequence(cards, wild_rank) {
        return Some(Meld {
            cards: SmallVec::from_slice(cards),
            kind: MeldKind::Sequence,
            pure: check.pure,
        });
    }
    if let Some(check) = validate_set(cards, wild_rank) {
        return Some(Meld {
            cards: SmallVec::from_slice(cards),
            kind: MeldKind::Set,
            pure: check.pure,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::standard(suit, rank)
    }

    // A wild rank far away from the ranks under test.
    const WILD: Rank = Rank::Two;

    #[test]
    fn test_pure_sequence() {
        let cards = [
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Hearts, Rank::Six),
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: true }));
    }

    #[test]
    fn test_sequence_order_does_not_matter() {
        let cards = [
            card(Suit::Hearts, Rank::Six),
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: true }));
    }

    #[test]
    fn test_joker_fills_internal_gap() {
        let cards = [
            card(Suit::Hearts, Rank::Four),
            card(Suit::Clubs, Rank::Two), // wild
            card(Suit::Hearts, Rank::Six),
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: false }));
    }

    #[test]
    fn test_joker_fills_gap_regardless_of_position() {
        // The joker card sorts nowhere in particular; the gap is internal.
        let cards = [
            Card::printed_joker(Rank::RedJoker),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Spades, Rank::Seven),
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: false }));
    }

    #[test]
    fn test_mixed_suit_is_invalid() {
        let cards = [
            card(Suit::Hearts, Rank::Four),
            card(Suit::Diamonds, Rank::Five),
            card(Suit::Hearts, Rank::Six),
        ];
        assert_eq!(validate_sequence(&cards, WILD), None);
    }

    #[test]
    fn test_no_wrap_around_the_king() {
        let cards = [
            card(Suit::Spades, Rank::Queen),
            card(Suit::Spades, Rank::King),
            card(Suit::Spades, Rank::Ace),
        ];
        assert_eq!(validate_sequence(&cards, WILD), None);
    }

    #[test]
    fn test_leftover_joker_extends_below_the_king() {
        // Q-K plus a joker: the block can only extend downward (J-Q-K).
        let cards = [
            card(Suit::Spades, Rank::Queen),
            card(Suit::Spades, Rank::King),
            Card::printed_joker(Rank::BlackJoker),
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: false }));
    }

    #[test]
    fn test_duplicate_rank_is_invalid() {
        let cards = [
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
        ];
        assert_eq!(validate_sequence(&cards, WILD), None);
    }

    #[test]
    fn test_two_jokers_cover_two_gaps() {
        let cards = [
            card(Suit::Clubs, Rank::Four),
            Card::printed_joker(Rank::RedJoker),
            card(Suit::Clubs, Rank::Six),
            Card::printed_joker(Rank::BlackJoker),
            card(Suit::Clubs, Rank::Eight),
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: false }));
    }

    #[test]
    fn test_gap_too_wide_for_jokers() {
        let cards = [
            card(Suit::Clubs, Rank::Four),
            Card::printed_joker(Rank::RedJoker),
            card(Suit::Clubs, Rank::Eight),
        ];
        assert_eq!(validate_sequence(&cards, WILD), None);
    }

    #[test]
    fn test_too_short() {
        let cards = [card(Suit::Hearts, Rank::Four), card(Suit::Hearts, Rank::Five)];
        assert_eq!(validate_sequence(&cards, WILD), None);
        assert_eq!(validate_set(&cards, WILD), None);
    }

    #[test]
    fn test_all_jokers_is_an_impure_sequence() {
        let cards = [
            Card::printed_joker(Rank::RedJoker),
            Card::printed_joker(Rank::BlackJoker),
            card(Suit::Hearts, Rank::Two), // wild
        ];
        assert_eq!(validate_sequence(&cards, WILD), Some(MeldCheck { pure: false }));
        let meld = classify(&cards, WILD).unwrap();
        assert_eq!(meld.kind, MeldKind::Sequence);
        assert!(!meld.pure);
    }

    #[test]
    fn test_pure_set() {
        let cards = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Seven),
            card(Suit::Diamonds, Rank::Seven),
        ];
        assert_eq!(validate_set(&cards, WILD), Some(MeldCheck { pure: true }));
    }

    #[test]
    fn test_set_with_four_cards() {
        let cards = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Seven),
            card(Suit::Diamonds, Rank::Seven),
            card(Suit::Clubs, Rank::Seven),
        ];
        assert_eq!(validate_set(&cards, WILD), Some(MeldCheck { pure: true }));
    }

    #[test]
    fn test_set_duplicate_suit_is_invalid() {
        let cards = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Seven),
        ];
        assert_eq!(validate_set(&cards, WILD), None);
    }

    #[test]
    fn test_set_mixed_rank_is_invalid() {
        let cards = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Seven),
        ];
        assert_eq!(validate_set(&cards, WILD), None);
    }

    #[test]
    fn test_impure_set_with_joker() {
        let cards = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Seven),
            Card::printed_joker(Rank::RedJoker),
        ];
        assert_eq!(validate_set(&cards, WILD), Some(MeldCheck { pure: false }));
        let meld = classify(&cards, WILD).unwrap();
        assert_eq!(meld.kind, MeldKind::Set);
    }

    #[test]
    fn test_set_of_five_is_invalid() {
        let cards = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Seven),
            card(Suit::Diamonds, Rank::Seven),
            card(Suit::Clubs, Rank::Seven),
            Card::printed_joker(Rank::RedJoker),
        ];
        assert_eq!(validate_set(&cards, WILD), None);
    }

    #[test]
    fn test_wild_rank_card_acts_as_joker() {
        // Wild rank is Two; the two of clubs fills the five-of-hearts gap.
        let cards = [
            card(Suit::Hearts, Rank::Four),
            card(Suit::Clubs, Rank::Two),
            card(Suit::Hearts, Rank::Six),
        ];
        assert!(is_joker(card(Suit::Clubs, Rank::Two), Rank::Two));
        assert_eq!(validate_sequence(&cards, Rank::Two), Some(MeldCheck { pure: false }));
    }

    #[test]
    fn test_printed_joker_wild_never_matches_standard_cards() {
        // When the wild pick lands on a printed joker, no standard card
        // inherits wildness.
        assert!(!is_joker(card(Suit::Hearts, Rank::Five), Rank::RedJoker));
        assert!(is_joker(Card::printed_joker(Rank::RedJoker), Rank::RedJoker));
    }

    #[test]
    fn test_classify_prefers_sequence() {
        let run = [
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Hearts, Rank::Six),
        ];
        assert_eq!(classify(&run, WILD).unwrap().kind, MeldKind::Sequence);

        let set = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Seven),
            card(Suit::Diamonds, Rank::Seven),
        ];
        assert_eq!(classify(&set, WILD).unwrap().kind, MeldKind::Set);

        let junk = [
            card(Suit::Spades, Rank::Seven),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Nine),
        ];
        assert!(classify(&junk, WILD).is_none());
    }
}
