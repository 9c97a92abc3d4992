use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action {action:?}: {reason}")]
    IllegalAction { action: Action, reason: String },
    #[error("Invalid bet amount: {amount}, available: {available}")]
    IllegalBet { amount: i64, available: u32 },
    #[error("Deck is empty")]
    EmptyDeck,
}

impl GameError {
    pub(crate) fn illegal(action: Action, reason: impl Into<String>) -> Self {
        GameError::IllegalAction {
            action,
            reason: reason.into(),
        }
    }
}
