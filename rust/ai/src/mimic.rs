//! Seat that plays like the house.

use blackjack_engine::cards::Card;
use blackjack_engine::hand::Hand;
use blackjack_engine::player::{dealer_policy, Action, Decide, SeatView, TurnOptions};

use crate::flat_bet;

/// Hits below 17 and stands otherwise, exactly like the dealer, betting a
/// flat unit every round. Never doubles or splits.
///
/// ```rust
/// use blackjack_ai::mimic::Mimic;
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::Hand;
/// use blackjack_engine::player::{Action, Decide, TurnOptions};
///
/// let mut seat = Mimic::new(25);
/// let hand = Hand::with_cards([
///     Card::new(Suit::Hearts, Rank::Ten),
///     Card::new(Suit::Clubs, Rank::Six),
/// ]);
/// assert_eq!(seat.take_turn(&hand, TurnOptions::default(), None), Action::Hit);
/// ```
#[derive(Debug, Clone)]
pub struct Mimic {
    unit: u32,
}

impl Mimic {
    pub fn new(unit: u32) -> Self {
        Self { unit }
    }
}

impl Decide for Mimic {
    fn place_bet(&mut self, seat: &SeatView) -> i64 {
        flat_bet(self.unit, seat)
    }

    fn take_turn(&mut self, hand: &Hand, _options: TurnOptions, _up: Option<Card>) -> Action {
        dealer_policy(hand)
    }
}
