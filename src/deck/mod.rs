//! Deck lifecycle: the fixed 54-card deck, dealing, and the two piles.
//!
//! ## Piles
//!
//! The stock (`closed`) and discard pile (`open`) are ordered vectors with
//! the top at the end; draws and discards are `pop`/`push` at the end. When
//! the stock runs dry it is rebuilt by shuffling the discard pile minus its
//! top card, which stays behind as the sole open card. Only when both piles
//! are out does a draw fail.
//!
//! ## Dealing
//!
//! A deal shuffles the full deck, gives 13 cards to each hand, seeds the
//! open pile with one card, and leaves the remaining 27 as the stock. One
//! uniformly random stock card becomes the wild joker; the card itself stays
//! in the stock, only its rank matters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Card, GameRng, Rank, Suit};

/// Cards dealt to each hand.
pub const HAND_SIZE: usize = 13;

/// Total cards in play: 52 standard + 2 printed jokers.
pub const DECK_SIZE: usize = 54;

/// Pile-level failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    /// Both piles are out of drawable cards.
    #[error("no cards left to draw")]
    Exhausted,
    /// The open pile has no card to take.
    #[error("the open pile is empty")]
    EmptyOpen,
}

/// Build the fixed 54-card deck in layout order. Deterministic, no
/// randomness; card identity comes entirely from the layout.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::STANDARD {
        for rank in Rank::STANDARD {
            deck.push(Card::standard(suit, rank));
        }
    }
    deck.push(Card::printed_joker(Rank::RedJoker));
    deck.push(Card::printed_joker(Rank::BlackJoker));
    deck
}

/// The stock and discard pile of one game.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Piles {
    /// Face-down stock; top at the end.
    pub closed: Vec<Card>,
    /// Face-up discard pile; top at the end.
    pub open: Vec<Card>,
}

impl Piles {
    /// Draw the top card of the stock, recycling the discard pile into a
    /// fresh stock first if needed.
    ///
    /// Fails with [`DeckError::Exhausted`] only when the stock is empty and
    /// the open pile has at most one card left. Nothing mutates on failure.
    pub fn draw_closed(&mut self, rng: &mut GameRng) -> Result<Card, DeckError> {
        if self.closed.is_empty() {
            self.recycle(rng)?;
        }
        self.closed.pop().ok_or(DeckError::Exhausted)
    }

    /// Draw the top card of the open pile.
    pub fn draw_open(&mut self) -> Result<Card, DeckError> {
        self.open.pop().ok_or(DeckError::EmptyOpen)
    }

    /// Put a card on top of the open pile.
    pub fn discard(&mut self, card: Card) {
        self.open.push(card);
    }

    /// Peek at the top of the open pile.
    #[must_use]
    pub fn open_top(&self) -> Option<Card> {
        self.open.last().copied()
    }

    /// Total cards across both piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.closed.len() + self.open.len()
    }

    /// Rebuild the stock from the discard pile, holding out its top card.
    fn recycle(&mut self, rng: &mut GameRng) -> Result<(), DeckError> {
        if self.open.len() <= 1 {
            return Err(DeckError::Exhausted);
        }
        let Some(top) = self.open.pop() else {
            return Err(DeckError::Exhausted);
        };
        self.closed = std::mem::take(&mut self.open);
        rng.shuffle(&mut self.closed);
        self.open.push(top);
        Ok(())
    }
}

/// Everything a fresh deal produces.
#[derive(Clone, Debug)]
pub struct DealtTable {
    pub player_hand: Vec<Card>,
    pub bot_hand: Vec<Card>,
    pub piles: Piles,
    pub wild_joker: Card,
}

/// Deal a new table from a shuffled full deck.
#[must_use]
pub fn deal(rng: &mut GameRng) -> DealtTable {
    let mut deck = full_deck();
    rng.shuffle(&mut deck);

    let player_hand: Vec<Card> = deck.drain(..HAND_SIZE).collect();
    let bot_hand: Vec<Card> = deck.drain(..HAND_SIZE).collect();

    let open_seed = deck
        .pop()
        .expect("a 54-card deck always has a card left to seed the open pile");

    // 27 cards remain; the wild pick cannot fail.
    let wild_index = rng.gen_range_usize(0..deck.len());
    let wild_joker = deck[wild_index];

    DealtTable {
        player_hand,
        bot_hand,
        piles: Piles {
            closed: deck,
            open: vec![open_seed],
        },
        wild_joker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_full_deck_has_54_distinct_ids() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let ids: FxHashSet<_> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);

        let jokers = deck.iter().filter(|c| c.is_printed_joker()).count();
        assert_eq!(jokers, 2);
    }

    #[test]
    fn test_deal_shape() {
        let mut rng = GameRng::new(42);
        let dealt = deal(&mut rng);

        assert_eq!(dealt.player_hand.len(), HAND_SIZE);
        assert_eq!(dealt.bot_hand.len(), HAND_SIZE);
        assert_eq!(dealt.piles.open.len(), 1);
        assert_eq!(dealt.piles.closed.len(), 27);

        // Wild joker resides in the stock.
        assert!(dealt.piles.closed.iter().any(|c| c.id == dealt.wild_joker.id));
    }

    #[test]
    fn test_deal_is_deterministic_per_seed() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);

        let d1 = deal(&mut rng1);
        let d2 = deal(&mut rng2);

        assert_eq!(d1.player_hand, d2.player_hand);
        assert_eq!(d1.bot_hand, d2.bot_hand);
        assert_eq!(d1.piles.closed, d2.piles.closed);
        assert_eq!(d1.wild_joker, d2.wild_joker);
    }

    #[test]
    fn test_draw_closed_and_open() {
        let mut rng = GameRng::new(42);
        let mut dealt = deal(&mut rng);

        let top = *dealt.piles.closed.last().unwrap();
        assert_eq!(dealt.piles.draw_closed(&mut rng), Ok(top));

        let open_top = dealt.piles.open_top().unwrap();
        assert_eq!(dealt.piles.draw_open(), Ok(open_top));
        assert_eq!(dealt.piles.draw_open(), Err(DeckError::EmptyOpen));
    }

    #[test]
    fn test_recycle_keeps_open_top() {
        let mut rng = GameRng::new(42);
        let deck = full_deck();

        let mut piles = Piles {
            closed: vec![],
            open: deck[..5].to_vec(),
        };
        let prior_top = piles.open_top().unwrap();

        let drawn = piles.draw_closed(&mut rng).unwrap();

        // Open pile keeps exactly the prior top card; the stock was rebuilt
        // from the other four and one was drawn.
        assert_eq!(piles.open, vec![prior_top]);
        assert_eq!(piles.closed.len(), 3);
        assert_ne!(drawn.id, prior_top.id);

        let mut survivors: FxHashSet<_> = piles.closed.iter().map(|c| c.id).collect();
        survivors.insert(drawn.id);
        let expected: FxHashSet<_> = deck[..4].iter().map(|c| c.id).collect();
        assert_eq!(survivors, expected);
    }

    #[test]
    fn test_exhausted_when_open_too_small() {
        let mut rng = GameRng::new(42);
        let deck = full_deck();

        let mut piles = Piles {
            closed: vec![],
            open: vec![deck[0]],
        };
        assert_eq!(piles.draw_closed(&mut rng), Err(DeckError::Exhausted));
        // Nothing mutated on failure.
        assert_eq!(piles.open.len(), 1);
        assert!(piles.closed.is_empty());
    }
}
