//! # blackjack-ai: automated seats for the blackjack engine
//!
//! Ready-made [`Decide`] implementations for filling seats without a human
//! at the keyboard, used by simulations and tests.
//!
//! ## Strategies
//!
//! - `"mimic"` - [`mimic::Mimic`], plays the dealer's own policy
//! - `"basic"` - [`basic::BasicStrategy`], a compact basic-strategy chart
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_ai::create_strategy;
//! use blackjack_engine::engine::BlackjackGame;
//! use blackjack_engine::player::Player;
//!
//! let mut game = BlackjackGame::new(Some(42)).with_max_rounds(Some(5));
//! game.join(Player::with_cash("bot", 1000, create_strategy("basic")));
//!
//! let summary = game.play_game().expect("strategies only pick legal actions");
//! assert_eq!(summary.rounds_played, 5);
//! ```

use blackjack_engine::player::{Decide, SeatView};

pub mod basic;
pub mod mimic;

/// Names accepted by [`create_strategy`].
pub const STRATEGIES: [&str; 2] = ["mimic", "basic"];

/// Wager used when no other unit is configured.
pub const DEFAULT_UNIT: u32 = 10;

/// Factory for automated seats by name.
///
/// ```rust
/// use blackjack_ai::{create_strategy, STRATEGIES};
///
/// for name in STRATEGIES {
///     let _seat = create_strategy(name);
/// }
/// ```
///
/// # Panics
///
/// Panics on a name not listed in [`STRATEGIES`].
pub fn create_strategy(name: &str) -> Box<dyn Decide> {
    match name {
        "mimic" => Box::new(mimic::Mimic::new(DEFAULT_UNIT)),
        "basic" => Box::new(basic::BasicStrategy::new(DEFAULT_UNIT)),
        _ => panic!("Unknown strategy: {}", name),
    }
}

/// Flat wager of `unit`, trimmed to what the seat can still cover.
pub(crate) fn flat_bet(unit: u32, seat: &SeatView) -> i64 {
    i64::from(unit.min(seat.available_cash).max(1))
}
