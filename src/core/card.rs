//! Card identity: suits, ranks, point values.
//!
//! ## CardId
//!
//! Every physical card has a fixed, deterministic identity: the 52
//! rank/suit combinations occupy ids 0-51 (`suit_index * 13 + rank_index`)
//! and the two printed jokers take 52 and 53. Identity never depends on
//! shuffling, so two games built from `deck::full_deck()` agree on every id.
//!
//! ## Values
//!
//! Scoring values are A=1, 2-10 face, J/Q/K=10, printed jokers 0.
//! Sequence ordering is A=1 .. K=13 with no wrap: there is no rank above
//! the king, which is what makes K-A-2 an invalid run.

use serde::{Deserialize, Serialize};

/// Card suit. `Joker` is reserved for the two printed jokers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Joker,
}

impl Suit {
    /// The four standard suits, in deck-building order.
    pub const STANDARD: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
            Suit::Joker => "joker",
        };
        write!(f, "{name}")
    }
}

/// Card rank. The printed jokers carry their own ranks so that a wild-joker
/// comparison (`rank == wild_rank`) can never match a standard card when the
/// wild card turned out to be a printed joker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    RedJoker,
    BlackJoker,
}

impl Rank {
    /// The thirteen standard ranks, in deck-building order.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position in an ascending run: A=1 .. K=13. `None` for printed-joker
    /// ranks, which have no place in a sequence of their own.
    #[must_use]
    pub const fn sequence_value(self) -> Option<u8> {
        match self {
            Rank::Ace => Some(1),
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            Rank::Ten => Some(10),
            Rank::Jack => Some(11),
            Rank::Queen => Some(12),
            Rank::King => Some(13),
            Rank::RedJoker | Rank::BlackJoker => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::RedJoker => "red joker",
            Rank::BlackJoker => "black joker",
        };
        write!(f, "{name}")
    }
}

/// Deterministic per-card identity, unique across the 54-card deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl CardId {
    /// Get the raw id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One physical card. Immutable once created; everything derives from the
/// suit/rank pair, including the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a standard (non-joker) card. The id is derived from the
    /// suit/rank position in the fixed deck layout.
    #[must_use]
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        let suit_index = Suit::STANDARD
            .iter()
            .position(|&s| s == suit)
            .expect("standard cards must use one of the four standard suits");
        let rank_index = Rank::STANDARD
            .iter()
            .position(|&r| r == rank)
            .expect("standard cards must use one of the thirteen standard ranks");
        Self {
            id: CardId((suit_index * 13 + rank_index) as u8),
            suit,
            rank,
        }
    }

    /// Create one of the two printed jokers.
    #[must_use]
    pub fn printed_joker(rank: Rank) -> Self {
        let id = match rank {
            Rank::RedJoker => CardId(52),
            Rank::BlackJoker => CardId(53),
            _ => panic!("printed jokers must use a joker rank"),
        };
        Self {
            id,
            suit: Suit::Joker,
            rank,
        }
    }

    /// Whether this is one of the two printed jokers.
    #[must_use]
    pub const fn is_printed_joker(self) -> bool {
        matches!(self.suit, Suit::Joker)
    }

    /// Scoring value: A=1, 2-10 face, J/Q/K=10, printed jokers 0.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self.rank {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::RedJoker | Rank::BlackJoker => 0,
        }
    }

    /// Position in an ascending run, if this rank has one.
    #[must_use]
    pub const fn sequence_value(self) -> Option<u8> {
        self.rank.sequence_value()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_printed_joker() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{} of {}", self.rank, self.suit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_card_ids_follow_layout() {
        assert_eq!(Card::standard(Suit::Hearts, Rank::Ace).id, CardId(0));
        assert_eq!(Card::standard(Suit::Hearts, Rank::King).id, CardId(12));
        assert_eq!(Card::standard(Suit::Diamonds, Rank::Ace).id, CardId(13));
        assert_eq!(Card::standard(Suit::Spades, Rank::King).id, CardId(51));
    }

    #[test]
    fn test_joker_ids() {
        assert_eq!(Card::printed_joker(Rank::RedJoker).id, CardId(52));
        assert_eq!(Card::printed_joker(Rank::BlackJoker).id, CardId(53));
    }

    #[test]
    fn test_values() {
        assert_eq!(Card::standard(Suit::Clubs, Rank::Ace).value(), 1);
        assert_eq!(Card::standard(Suit::Clubs, Rank::Seven).value(), 7);
        assert_eq!(Card::standard(Suit::Clubs, Rank::Ten).value(), 10);
        assert_eq!(Card::standard(Suit::Clubs, Rank::Jack).value(), 10);
        assert_eq!(Card::standard(Suit::Clubs, Rank::Queen).value(), 10);
        assert_eq!(Card::standard(Suit::Clubs, Rank::King).value(), 10);
        assert_eq!(Card::printed_joker(Rank::RedJoker).value(), 0);
    }

    #[test]
    fn test_sequence_values() {
        assert_eq!(Rank::Ace.sequence_value(), Some(1));
        assert_eq!(Rank::Ten.sequence_value(), Some(10));
        assert_eq!(Rank::King.sequence_value(), Some(13));
        assert_eq!(Rank::RedJoker.sequence_value(), None);
    }

    #[test]
    fn test_display() {
        let card = Card::standard(Suit::Hearts, Rank::Queen);
        assert_eq!(card.to_string(), "Q of hearts");
        assert_eq!(Card::printed_joker(Rank::BlackJoker).to_string(), "black joker");
    }

    #[test]
    fn test_serde_shape() {
        let card = Card::standard(Suit::Spades, Rank::Ace);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"spades\""));
        assert!(json.contains("\"ace\""));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
