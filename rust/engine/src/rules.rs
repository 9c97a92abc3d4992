use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::hand::Hand;
use crate::player::Action;

/// How a finished hand fared against the dealer's finished hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A natural that beat the dealer; pays 3:2.
    BlackjackWin,
    Win,
    Push,
    Loss,
}

impl Outcome {
    /// Signed change to the owner's cash for a hand carrying `bet`.
    /// Blackjack pays `floor(bet * 1.5)`.
    ///
    /// ```
    /// use blackjack_engine::rules::Outcome;
    ///
    /// assert_eq!(Outcome::BlackjackWin.payout(15), 22);
    /// assert_eq!(Outcome::Win.payout(15), 15);
    /// assert_eq!(Outcome::Push.payout(15), 0);
    /// assert_eq!(Outcome::Loss.payout(15), -15);
    /// ```
    pub fn payout(self, bet: u32) -> i64 {
        let bet = i64::from(bet);
        match self {
            Outcome::BlackjackWin => bet * 3 / 2,
            Outcome::Win => bet,
            Outcome::Push => 0,
            Outcome::Loss => -bet,
        }
    }
}

/// Checks a wager against the cash a player still has uncommitted.
///
/// A wager is valid when it is at least 1 and no more than `available`.
///
/// # Errors
///
/// Returns [`GameError::IllegalBet`] for zero, negative, or unaffordable wagers.
///
/// # Examples
///
/// ```
/// use blackjack_engine::rules::validate_bet;
/// use blackjack_engine::errors::GameError;
///
/// assert_eq!(validate_bet(100, 1000), Ok(100));
/// assert_eq!(validate_bet(1000, 1000), Ok(1000));
/// assert!(matches!(validate_bet(0, 1000), Err(GameError::IllegalBet { .. })));
/// assert!(matches!(validate_bet(-5, 1000), Err(GameError::IllegalBet { .. })));
/// assert!(matches!(validate_bet(1001, 1000), Err(GameError::IllegalBet { .. })));
/// ```
pub fn validate_bet(wager: i64, available: u32) -> Result<u32, GameError> {
    if (1..=i64::from(available)).contains(&wager) {
        Ok(wager as u32)
    } else {
        Err(GameError::IllegalBet {
            amount: wager,
            available,
        })
    }
}

/// Checks that `action` may be applied to `hand` right now, given the
/// owner's available cash. Nothing is mutated.
pub fn validate_action(action: Action, hand: &Hand, available: u32) -> Result<(), GameError> {
    if hand.is_invalid() {
        return Err(GameError::illegal(action, "hand was split"));
    }
    if !hand.is_active() {
        return Err(GameError::illegal(action, "hand is no longer in play"));
    }
    match action {
        Action::Hit | Action::Stand => Ok(()),
        Action::DoubleDown if hand.double_down_allowed(available) => Ok(()),
        Action::DoubleDown => Err(GameError::illegal(
            action,
            format!("bet {} cannot be matched with {} available", hand.bet(), available),
        )),
        Action::Split if hand.split_allowed(available) => Ok(()),
        Action::Split if hand.splittable() => Err(GameError::illegal(
            action,
            format!("bet {} cannot be matched with {} available", hand.bet(), available),
        )),
        Action::Split => Err(GameError::illegal(action, format!("hand [{}] is not a pair", hand))),
    }
}

/// The hand beats the opponent when the opponent busted and it did not,
/// when it holds the only blackjack, or when neither is a blackjack nor
/// busted and its total is higher.
pub fn is_win(hand: &Hand, opponent: &Hand) -> bool {
    (opponent.is_busted() && !hand.is_busted())
        || (!opponent.is_blackjack() && hand.is_blackjack())
        || (!opponent.is_blackjack()
            && !opponent.is_busted()
            && !hand.is_busted()
            && hand.total().points() > opponent.total().points())
}

/// Both blackjacks, or neither a blackjack and equal totals. Two busted
/// hands have equal totals.
pub fn is_push(hand: &Hand, opponent: &Hand) -> bool {
    (opponent.is_blackjack() && hand.is_blackjack())
        || (!opponent.is_blackjack() && !hand.is_blackjack() && hand.total() == opponent.total())
}

pub fn settle(hand: &Hand, opponent: &Hand) -> Outcome {
    if is_win(hand, opponent) {
        if hand.is_blackjack() {
            Outcome::BlackjackWin
        } else {
            Outcome::Win
        }
    } else if is_push(hand, opponent) {
        Outcome::Push
    } else {
        Outcome::Loss
    }
}
