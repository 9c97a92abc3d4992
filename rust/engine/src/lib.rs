//! # blackjack-engine: Blackjack Rules Engine Core
//!
//! A turn-based casino Blackjack engine for any number of seated players
//! against a dealer. Covers card valuation, soft-ace totals, the per-hand
//! hit/stand/double-down/split state machine, settlement, and the round loop.
//! Presentation and input gathering stay outside: they plug in through
//! [`events::EventBus`] handlers and the [`player::Decide`] trait.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and values
//! - [`deck`] - Seeded 52-card deck: fill, shuffle, draw, reset
//! - [`hand`] - Hand totals, status flags, and the per-hand actions
//! - [`rules`] - Bet/action validation and win/push/loss settlement
//! - [`player`] - Seats, bankrolls, the dealer policy, decision interface
//! - [`events`] - Pre/post phase notifications for observers
//! - [`engine`] - Round and game orchestration
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::{Hand, HandTotal};
//!
//! let hand = Hand::with_cards([
//!     Card::new(Suit::Spades, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Clubs, Rank::Nine),
//! ]);
//! assert_eq!(hand.total(), HandTotal::Points(21));
//! assert!(hand.is_soft());
//! assert!(!hand.is_blackjack());
//! ```
//!
//! ## Observing a Game
//!
//! ```rust
//! use blackjack_engine::engine::BlackjackGame;
//! use blackjack_engine::events::{Event, EventId};
//!
//! let game = BlackjackGame::new(Some(42));
//! game.events().register(EventId::PostDeterminePlayersHandWin, |event| {
//!     if let Event::HandSettlement { winnings: Some(w), .. } = event {
//!         println!("hand paid {}", w);
//!     }
//! });
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod hand;
pub mod player;
pub mod rules;
