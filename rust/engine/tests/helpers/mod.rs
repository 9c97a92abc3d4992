#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::deck::Deck;
use blackjack_engine::hand::Hand;
use blackjack_engine::player::{Action, Decide, SeatView, TurnOptions};

pub fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

pub fn hand(ranks: &[Rank]) -> Hand {
    Hand::with_cards(ranks.iter().map(|&r| card(r)))
}

/// Deck that deals `ranks` in the given order.
pub fn stacked_deck(ranks: &[Rank]) -> Deck {
    let mut cards: Vec<Card> = ranks.iter().map(|&r| card(r)).collect();
    cards.reverse();
    Deck::from_cards(cards, 99)
}

/// What a scripted player was shown on each turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSeen {
    pub hand: Hand,
    pub options: TurnOptions,
    pub dealer_up_card: Option<Card>,
}

/// Replays queued bets and actions. Bets default to 10 and actions to
/// `Stand` once the queues run dry.
#[derive(Debug, Default)]
pub struct Scripted {
    bets: VecDeque<i64>,
    actions: VecDeque<Action>,
    pub seen: Rc<RefCell<Vec<TurnSeen>>>,
}

impl Scripted {
    pub fn new(bets: &[i64], actions: &[Action]) -> Self {
        Self {
            bets: bets.iter().copied().collect(),
            actions: actions.iter().copied().collect(),
            seen: Rc::default(),
        }
    }
}

impl Decide for Scripted {
    fn place_bet(&mut self, _seat: &SeatView) -> i64 {
        self.bets.pop_front().unwrap_or(10)
    }

    fn take_turn(&mut self, hand: &Hand, options: TurnOptions, dealer_up_card: Option<Card>) -> Action {
        self.seen.borrow_mut().push(TurnSeen {
            hand: hand.clone(),
            options,
            dealer_up_card,
        });
        self.actions.pop_front().unwrap_or(Action::Stand)
    }
}
