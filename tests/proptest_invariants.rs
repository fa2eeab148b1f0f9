//! Property tests over random seeds and playouts.

use proptest::prelude::*;

use rummy_engine::{
    engine, melds, Card, DrawSource, GameId, GameRng, GameState, GameStatus, Rank, Seat, Suit,
    TurnPhase, DECK_SIZE,
};

fn playout(seed: u64, steps: usize) -> GameState {
    let mut state = GameState::new(GameId::new(), "prop", GameRng::new(seed));

    for step in 0..steps {
        if state.status != GameStatus::Active {
            break;
        }
        match state.current_player {
            Seat::Player => match state.phase {
                TurnPhase::AwaitingDraw => {
                    let source = if step % 3 == 0 && state.piles.open_top().is_some() {
                        DrawSource::Open
                    } else {
                        DrawSource::Closed
                    };
                    match engine::draw(&mut state, source) {
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }
                TurnPhase::AwaitingDiscard => {
                    let index = step % state.player_hand.len();
                    engine::discard(&mut state, index).unwrap();
                }
            },
            Seat::Bot => match engine::bot_turn(&mut state) {
                Ok(_) => {}
                Err(_) => break,
            },
        }
        assert!(state.conservation_holds(), "seed {seed} step {step}");
    }
    state
}

proptest! {
    /// No card is ever lost or duplicated, whatever the seed or the
    /// interleaving of draws and discards.
    #[test]
    fn random_playouts_conserve_all_cards(seed in any::<u64>(), steps in 1usize..80) {
        let state = playout(seed, steps);
        prop_assert!(state.conservation_holds());
    }

    /// The seats strictly alternate: after a player discard it is the
    /// bot's turn, and after the bot moves it is the player's again.
    #[test]
    fn turns_alternate(seed in any::<u64>()) {
        let state = playout(seed, 40);
        let mut last_discarder = None;
        for entry in state.history.iter() {
            if let rummy_engine::MoveAction::Discard { .. } = entry.action {
                if let Some(previous) = last_discarder {
                    prop_assert_ne!(previous, entry.seat, "seed {}", seed);
                }
                last_discarder = Some(entry.seat);
            }
        }
    }

    /// Dealing partitions the deck for every seed.
    #[test]
    fn deal_partitions_the_deck(seed in any::<u64>()) {
        let state = GameState::new(GameId::new(), "prop", GameRng::new(seed));
        prop_assert!(state.conservation_holds());
        prop_assert_eq!(state.player_hand.len(), 13);
        prop_assert_eq!(state.bot_hand.len(), 13);
        prop_assert_eq!(state.piles.total() + 26, DECK_SIZE);
    }

    /// An in-suit run of consecutive ranks is a pure sequence in any
    /// presentation order.
    #[test]
    fn shuffled_runs_stay_valid(
        suit_index in 0usize..4,
        start in 0usize..11,
        len in 3usize..=5,
        order_seed in any::<u64>(),
    ) {
        let suit = Suit::STANDARD[suit_index];
        let len = len.min(13 - start);
        let mut cards: Vec<Card> = Rank::STANDARD[start..start + len]
            .iter()
            .map(|&rank| Card::standard(suit, rank))
            .collect();
        let mut rng = GameRng::new(order_seed);
        rng.shuffle(&mut cards);

        // A wild rank outside the run keeps the sequence pure.
        let wild = if start == 0 { Rank::King } else { Rank::Ace };
        let check = melds::validate_sequence(&cards, wild);
        prop_assert_eq!(check.map(|c| c.pure), Some(true));
    }

    /// Replacing one run card with a printed joker keeps the sequence
    /// valid but impure.
    #[test]
    fn printed_joker_fills_a_gap(
        start in 0usize..10,
        hole in 0usize..3,
        order_seed in any::<u64>(),
    ) {
        let mut cards: Vec<Card> = Rank::STANDARD[start..start + 3]
            .iter()
            .map(|&rank| Card::standard(Suit::Clubs, rank))
            .collect();
        cards[hole] = Card::printed_joker(Rank::RedJoker);
        let mut rng = GameRng::new(order_seed);
        rng.shuffle(&mut cards);

        let wild = if start == 0 { Rank::King } else { Rank::Ace };
        let check = melds::validate_sequence(&cards, wild);
        prop_assert_eq!(check.map(|c| c.pure), Some(false));
    }
}
