use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::player::Action;
use crate::rules::{self, Outcome};

/// Best total of a hand: the highest unbusted sum over every ace valuation,
/// or `Bust` when every valuation exceeds 21.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HandTotal {
    Points(u8),
    Bust,
}

impl HandTotal {
    pub fn points(self) -> Option<u8> {
        match self {
            HandTotal::Points(p) => Some(p),
            HandTotal::Bust => None,
        }
    }

    pub fn is_bust(self) -> bool {
        self == HandTotal::Bust
    }
}

impl fmt::Display for HandTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandTotal::Points(p) => write!(f, "{}", p),
            HandTotal::Bust => f.write_str("BUST"),
        }
    }
}

/// One wager and the cards played against it.
///
/// A hand starts active with no cards. It leaves play by standing, busting,
/// or being split; a split hand is marked invalid and must not be played or
/// settled again.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    bet: u32,
    active: bool,
    invalid: bool,
    from_split: bool,
    // None until the next call to `total`
    total: Cell<Option<HandTotal>>,
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
            && self.bet == other.bet
            && self.active == other.active
            && self.invalid == other.invalid
            && self.from_split == other.from_split
    }
}

impl Eq for Hand {}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            bet: 0,
            active: true,
            invalid: false,
            from_split: false,
            total: Cell::new(None),
        }
    }

    /// Hand holding `cards`, otherwise fresh.
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            hand.add_card(card);
        }
        hand
    }

    /// Restores the state of a freshly created hand.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    pub fn add_card(&mut self, card: Card) -> &mut Self {
        self.cards.push(card);
        self.total.set(None);
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn is_from_split(&self) -> bool {
        self.from_split
    }

    pub fn total(&self) -> HandTotal {
        if let Some(total) = self.total.get() {
            return total;
        }
        let total = best_total(&self.cards);
        self.total.set(Some(total));
        total
    }

    /// True when the best total needs at least one ace counted as 11.
    pub fn is_soft(&self) -> bool {
        let HandTotal::Points(total) = self.total() else {
            return false;
        };
        let others: Vec<Card> = self.cards.iter().filter(|c| !c.is_ace()).copied().collect();
        let aces = (self.cards.len() - others.len()) as u8;
        match best_total(&others) {
            HandTotal::Points(base) => total != base + aces,
            HandTotal::Bust => false,
        }
    }

    pub fn is_blackjack(&self) -> bool {
        self.total() == HandTotal::Points(21) && self.cards.len() == 2 && !self.from_split
    }

    pub fn is_busted(&self) -> bool {
        self.total().is_bust()
    }

    pub fn is_active(&self) -> bool {
        self.active && !self.invalid && !self.is_busted()
    }

    pub fn hit(&mut self, card: Card) -> Result<HandTotal, GameError> {
        self.ensure_active(Action::Hit)?;
        self.add_card(card);
        let total = self.total();
        if total.is_bust() {
            self.active = false;
        }
        Ok(total)
    }

    pub fn stand(&mut self) -> Result<HandTotal, GameError> {
        self.ensure_active(Action::Stand)?;
        self.active = false;
        Ok(self.total())
    }

    /// Whether the owner can afford to match the current bet once more.
    /// `available_cash` is the owner's cash minus every committed bet,
    /// this hand's included.
    pub fn double_down_allowed(&self, available_cash: u32) -> bool {
        rules::validate_bet(i64::from(self.bet), available_cash).is_ok()
    }

    /// Doubles the bet, takes exactly one card, then stands.
    pub fn double_down(&mut self, card: Card, available_cash: u32) -> Result<HandTotal, GameError> {
        self.ensure_active(Action::DoubleDown)?;
        if !self.double_down_allowed(available_cash) {
            return Err(GameError::illegal(
                Action::DoubleDown,
                format!(
                    "bet {} cannot be matched with {} available",
                    self.bet, available_cash
                ),
            ));
        }
        self.bet *= 2;
        self.add_card(card);
        self.active = false;
        Ok(self.total())
    }

    /// Two cards of equal value, e.g. a ten and a king.
    pub fn splittable(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a.best_value() == b.best_value(),
            _ => false,
        }
    }

    pub fn split_allowed(&self, available_cash: u32) -> bool {
        self.splittable() && rules::validate_bet(i64::from(self.bet), available_cash).is_ok()
    }

    /// Splits into two one-card hands that each carry the current bet.
    /// This hand is left invalid with its bet cleared, so the owner's
    /// committed total grows by exactly one bet.
    pub fn split(&mut self, available_cash: u32) -> Result<[Hand; 2], GameError> {
        self.ensure_active(Action::Split)?;
        if !self.split_allowed(available_cash) {
            let reason = if self.splittable() {
                format!(
                    "bet {} cannot be matched with {} available",
                    self.bet, available_cash
                )
            } else {
                format!("hand [{}] is not a pair", self)
            };
            return Err(GameError::illegal(Action::Split, reason));
        }

        let bet = self.bet;
        let children = [self.cards[0], self.cards[1]].map(|card| {
            let mut child = Hand::with_cards([card]);
            child.bet = bet;
            child.from_split = true;
            child
        });

        self.clear_bet();
        self.invalid = true;
        self.active = false;
        Ok(children)
    }

    /// Assigns a wager after checking it against the owner's available cash.
    pub fn place_bet(&mut self, wager: i64, available_cash: u32) -> Result<u32, GameError> {
        let bet = rules::validate_bet(wager, available_cash)?;
        self.bet = bet;
        Ok(bet)
    }

    pub fn clear_bet(&mut self) {
        self.bet = 0;
    }

    pub fn outcome(&self, opponent: &Hand) -> Outcome {
        rules::settle(self, opponent)
    }

    /// Signed amount this hand pays out against the opponent's final hand.
    pub fn winnings(&self, opponent: &Hand) -> i64 {
        self.outcome(opponent).payout(self.bet)
    }

    pub fn win(&self, opponent: &Hand) -> bool {
        rules::is_win(self, opponent)
    }

    pub fn win_by_blackjack(&self, opponent: &Hand) -> bool {
        self.is_blackjack() && self.win(opponent)
    }

    pub fn push(&self, opponent: &Hand) -> bool {
        rules::is_push(self, opponent)
    }

    pub fn lose(&self, opponent: &Hand) -> bool {
        !self.win(opponent) && !self.push(opponent)
    }

    fn ensure_active(&self, action: Action) -> Result<(), GameError> {
        if self.invalid {
            Err(GameError::illegal(action, "hand was split"))
        } else if !self.is_active() {
            Err(GameError::illegal(action, "hand is no longer in play"))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

/// Expands every card's possible values across all partial totals, then keeps
/// the largest total that does not exceed 21.
fn best_total(cards: &[Card]) -> HandTotal {
    let mut totals: Vec<u32> = vec![0];
    for card in cards {
        let mut next: Vec<u32> = card
            .possible_values()
            .iter()
            .flat_map(|&v| totals.iter().map(move |t| t + u32::from(v)))
            .collect();
        // many aces collapse onto the same sums
        next.sort_unstable();
        next.dedup();
        totals = next;
    }
    totals
        .into_iter()
        .filter(|&t| t <= 21)
        .max()
        .map_or(HandTotal::Bust, |t| HandTotal::Points(t as u8))
}
