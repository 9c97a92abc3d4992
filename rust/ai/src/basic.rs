//! Compact basic strategy.
//!
//! Only the broad strokes of the full chart: split aces and eights, double
//! hard 10 and 11 against weaker up cards, and stand on stiff totals when
//! the dealer shows a bust card. Soft totals hit through 17.

use blackjack_engine::cards::{Card, Rank};
use blackjack_engine::hand::{Hand, HandTotal};
use blackjack_engine::player::{Action, Decide, SeatView, TurnOptions};

use crate::flat_bet;

/// Up-card value assumed when the dealer's card is unknown.
const UNKNOWN_UP_CARD: u8 = 10;

#[derive(Debug, Clone)]
pub struct BasicStrategy {
    unit: u32,
}

impl BasicStrategy {
    pub fn new(unit: u32) -> Self {
        Self { unit }
    }

    /// Chart lookup. Only picks double down or split when `options` allow it.
    pub fn action_for(hand: &Hand, options: TurnOptions, dealer_up_card: Option<Card>) -> Action {
        let total = match hand.total() {
            HandTotal::Points(total) => total,
            HandTotal::Bust => return Action::Stand,
        };
        let up = dealer_up_card.map_or(UNKNOWN_UP_CARD, |c| c.best_value());

        if options.split && Self::wants_split(hand) {
            return Action::Split;
        }

        let soft = hand.is_soft();
        if options.double_down && !soft && hand.len() == 2 {
            match total {
                11 if up < 11 => return Action::DoubleDown,
                10 if up < 10 => return Action::DoubleDown,
                _ => {}
            }
        }

        if soft {
            return if total <= 17 { Action::Hit } else { Action::Stand };
        }
        match total {
            0..=11 => Action::Hit,
            12 if (4..=6).contains(&up) => Action::Stand,
            12 => Action::Hit,
            13..=16 if (2..=6).contains(&up) => Action::Stand,
            13..=16 => Action::Hit,
            _ => Action::Stand,
        }
    }

    fn wants_split(hand: &Hand) -> bool {
        match hand.cards() {
            [a, b] => a.rank == b.rank && matches!(a.rank, Rank::Ace | Rank::Eight),
            _ => false,
        }
    }
}

impl Decide for BasicStrategy {
    fn place_bet(&mut self, seat: &SeatView) -> i64 {
        flat_bet(self.unit, seat)
    }

    fn take_turn(&mut self, hand: &Hand, options: TurnOptions, dealer_up_card: Option<Card>) -> Action {
        Self::action_for(hand, options, dealer_up_card)
    }
}
