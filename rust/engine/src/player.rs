use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{Hand, HandTotal};
use crate::rules;

/// A turn decision for one hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    DoubleDown,
    Split,
}

/// Bankroll every player sits down with.
pub const STARTING_CASH: u32 = 1000;

/// The dealer draws until reaching this total.
pub const DEALER_STANDS_ON: u8 = 17;

/// Read-only snapshot of a seat, handed to decision makers and event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub cash: u32,
    pub available_cash: u32,
    pub hands: Vec<Hand>,
}

/// The optional actions a hand may take this turn. Hit and stand are
/// always open to an active hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnOptions {
    pub double_down: bool,
    pub split: bool,
}

impl TurnOptions {
    pub fn for_hand(hand: &Hand, available_cash: u32) -> Self {
        Self {
            double_down: hand.double_down_allowed(available_cash),
            split: hand.split_allowed(available_cash),
        }
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Hit | Action::Stand => true,
            Action::DoubleDown => self.double_down,
            Action::Split => self.split,
        }
    }
}

/// Source of a seated player's decisions: a console prompt, a bot, a test script.
///
/// The engine re-validates every answer, so an implementation returning an
/// unaffordable bet or an unavailable action aborts the round with an error.
pub trait Decide {
    /// Wager for the coming round, between 1 and `seat.available_cash`.
    fn place_bet(&mut self, seat: &SeatView) -> i64;

    /// Next action for `hand`, restricted to what `options` allows.
    fn take_turn(&mut self, hand: &Hand, options: TurnOptions, dealer_up_card: Option<Card>)
        -> Action;
}

/// Who makes a seat's decisions.
pub enum Role<'a> {
    Human(Box<dyn Decide + 'a>),
    /// Fixed house policy: hit below [`DEALER_STANDS_ON`], never bet.
    Dealer,
}

impl fmt::Debug for Role<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Human(_) => f.write_str("Human"),
            Role::Dealer => f.write_str("Dealer"),
        }
    }
}

/// A seat at the table: bankroll, hands for the current round, and the
/// decision maker behind it.
#[derive(Debug)]
pub struct Player<'a> {
    name: String,
    cash: u32,
    hands: Vec<Hand>,
    seat: usize,
    role: Role<'a>,
}

impl<'a> Player<'a> {
    pub fn new(name: impl Into<String>, decider: impl Decide + 'a) -> Self {
        Self::with_cash(name, STARTING_CASH, Box::new(decider))
    }

    pub fn with_cash(name: impl Into<String>, cash: u32, decider: Box<dyn Decide + 'a>) -> Self {
        Self {
            name: name.into(),
            cash,
            hands: vec![Hand::new()],
            seat: 0,
            role: Role::Human(decider),
        }
    }

    pub fn dealer() -> Self {
        Self {
            name: "Dealer".to_string(),
            cash: 0,
            hands: vec![Hand::new()],
            seat: 0,
            role: Role::Dealer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash(&self) -> u32 {
        self.cash
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub(crate) fn set_seat(&mut self, seat: usize) {
        self.seat = seat;
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hands_mut(&mut self) -> &mut Vec<Hand> {
        &mut self.hands
    }

    /// The first hand; the only one unless the player split.
    pub fn hand(&self) -> &Hand {
        &self.hands[0]
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hands[0]
    }

    /// Cash not yet committed to any hand this round.
    pub fn available_cash(&self) -> u32 {
        let committed: u32 = self.hands.iter().map(Hand::bet).sum();
        self.cash.saturating_sub(committed)
    }

    /// The dealer's face-up card, the second one dealt. The first is the hole card.
    pub fn up_card(&self) -> Option<Card> {
        self.hand().card(1)
    }

    pub fn view(&self) -> SeatView {
        SeatView {
            seat: self.seat,
            name: self.name.clone(),
            cash: self.cash,
            available_cash: self.available_cash(),
            hands: self.hands.clone(),
        }
    }

    /// Replaces every hand with a single fresh one.
    pub fn reset_hands(&mut self) {
        self.hands = vec![Hand::new()];
    }

    /// Asks the decision maker for a wager and places it on the first hand.
    /// The dealer never bets.
    pub fn place_bet(&mut self) -> Result<u32, GameError> {
        let view = self.view();
        let wager = match &mut self.role {
            Role::Human(decider) => decider.place_bet(&view),
            Role::Dealer => 0,
        };
        self.bet(wager)
    }

    /// Places `wager` on the first hand if the player can cover it.
    pub fn bet(&mut self, wager: i64) -> Result<u32, GameError> {
        let available = self.available_cash();
        self.hands[0].place_bet(wager, available)
    }

    /// Decision for the hand at `index`. Panics if there is no such hand.
    pub fn decide(&mut self, index: usize, dealer_up_card: Option<Card>) -> Action {
        let available = self.available_cash();
        let hand = &self.hands[index];
        match &mut self.role {
            Role::Human(decider) => {
                decider.take_turn(hand, TurnOptions::for_hand(hand, available), dealer_up_card)
            }
            Role::Dealer => dealer_policy(hand),
        }
    }

    /// Checks and applies `action` to the hand at `index`, drawing from `deck`
    /// as needed. A split appends both new hands, each dealt one more card.
    pub fn apply(
        &mut self,
        index: usize,
        action: Action,
        deck: &mut Deck,
    ) -> Result<HandTotal, GameError> {
        let available = self.available_cash();
        rules::validate_action(action, &self.hands[index], available)?;
        let hand = &mut self.hands[index];
        match action {
            Action::Hit => hand.hit(deck.draw()?),
            Action::Stand => hand.stand(),
            Action::DoubleDown => hand.double_down(deck.draw()?, available),
            Action::Split => {
                if deck.len() < 2 {
                    return Err(GameError::EmptyDeck);
                }
                let children = hand.split(available)?;
                let total = hand.total();
                for mut child in children {
                    child.add_card(deck.draw()?);
                    self.hands.push(child);
                }
                Ok(total)
            }
        }
    }

    /// Drops hands consumed by a split.
    pub fn remove_invalid_hands(&mut self) {
        let hands = std::mem::take(&mut self.hands);
        self.hands = hands.into_iter().filter(|h| !h.is_invalid()).collect();
    }

    /// Adds signed winnings to the bankroll, flooring at zero.
    pub fn collect(&mut self, winnings: i64) {
        let cash = i64::from(self.cash) + winnings;
        self.cash = u32::try_from(cash.max(0)).unwrap_or(u32::MAX);
    }
}

/// Hit below [`DEALER_STANDS_ON`], stand otherwise.
pub fn dealer_policy(hand: &Hand) -> Action {
    match hand.total() {
        HandTotal::Points(total) if total < DEALER_STANDS_ON => Action::Hit,
        _ => Action::Stand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    struct Flat(i64);

    impl Decide for Flat {
        fn place_bet(&mut self, _seat: &SeatView) -> i64 {
            self.0
        }

        fn take_turn(&mut self, _: &Hand, _: TurnOptions, _: Option<Card>) -> Action {
            Action::Stand
        }
    }

    #[test]
    fn available_cash_tracks_the_bet() {
        let mut p = Player::new("p", Flat(0));
        let cash = p.cash();
        for wager in 100..=200 {
            p.bet(wager).expect("affordable");
            assert_eq!(p.available_cash(), cash - wager as u32);
            p.hand_mut().clear_bet();
        }
    }

    #[test]
    fn dealer_never_bets() {
        let mut dealer = Player::dealer();
        assert_eq!(dealer.cash(), 0);
        assert!(matches!(dealer.place_bet(), Err(GameError::IllegalBet { amount: 0, .. })));
    }

    #[test]
    fn collect_floors_at_zero() {
        let mut p = Player::new("p", Flat(0));
        p.collect(-5000);
        assert_eq!(p.cash(), 0);
    }

    #[test]
    fn up_card_is_the_second_card() {
        let mut dealer = Player::dealer();
        let hole = Card::new(Suit::Spades, Rank::Two);
        let up = Card::new(Suit::Hearts, Rank::Six);
        dealer.hand_mut().add_card(hole).add_card(up);
        assert_eq!(dealer.up_card(), Some(up));
    }

    fn pair_of_eights(deck_cards: Vec<Card>) -> (Player<'static>, Deck) {
        let mut p = Player::new("p", Flat(10));
        p.bet(10).expect("affordable");
        let eight = Card::new(Suit::Clubs, Rank::Eight);
        p.hand_mut().add_card(eight).add_card(eight);
        (p, Deck::from_cards(deck_cards, 1))
    }

    #[test]
    fn split_short_of_cards_leaves_hand_untouched() {
        let (mut p, mut deck) = pair_of_eights(vec![Card::new(Suit::Hearts, Rank::Two)]);
        let before = p.hand().clone();

        assert_eq!(p.apply(0, Action::Split, &mut deck), Err(GameError::EmptyDeck));
        assert_eq!(p.hands().len(), 1);
        assert_eq!(p.hand(), &before);
        assert!(!p.hand().is_invalid());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn split_deals_one_card_to_each_child() {
        let two = Card::new(Suit::Hearts, Rank::Two);
        let three = Card::new(Suit::Hearts, Rank::Three);
        let (mut p, mut deck) = pair_of_eights(vec![two, three]);

        p.apply(0, Action::Split, &mut deck).expect("split");
        assert!(p.hand().is_invalid());
        assert_eq!(p.hands().len(), 3);
        assert_eq!(p.hands()[1].card(1), Some(three));
        assert_eq!(p.hands()[2].card(1), Some(two));
        assert!(deck.is_empty());
        p.remove_invalid_hands();
        assert_eq!(p.available_cash(), p.cash() - 20);
    }
}
