//! Card, hand and settlement formatters for terminal display.
//!
//! Suits render as Unicode symbols where the terminal is likely to support
//! them and as bracketed letters otherwise.
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::format_card;
//!
//! let ace = Card::new(Suit::Spades, Rank::Ace);
//! assert!(format_card(&ace) == "ACE♠" || format_card(&ace) == "ACE(s)");
//! ```

use blackjack_engine::cards::{Card, Suit};
use blackjack_engine::hand::{Hand, HandTotal};
use blackjack_engine::player::SeatView;
use blackjack_engine::rules::Outcome;

/// Windows consoles other than Windows Terminal and VS Code fall back to ASCII.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "(h)",
            Suit::Diamonds => "(d)",
            Suit::Clubs => "(c)",
            Suit::Spades => "(s)",
        }
        .to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank, format_suit(&card.suit))
}

/// Comma separated cards, `-` for an empty hand.
pub fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "-".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_total(total: HandTotal) -> String {
    total.to_string()
}

/// `name ($available)` the way seats are introduced at the table.
pub fn format_seat(seat: &SeatView) -> String {
    format!("{} (${})", seat.name, seat.available_cash)
}

/// One settlement line for `hand` against the dealer's final hand.
///
/// ```rust
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::Hand;
/// # use blackjack_cli::formatters::format_settlement;
///
/// let h = |ranks: &[Rank]| Hand::with_cards(ranks.iter().map(|&r| Card::new(Suit::Clubs, r)));
/// let player = h(&[Rank::Ten, Rank::Nine]);
/// let dealer = h(&[Rank::Ten, Rank::Seven]);
/// assert_eq!(format_settlement(&player, &dealer, 25), "Won $25!");
/// assert_eq!(format_settlement(&dealer, &player, -25), "Lost $25.");
/// ```
pub fn format_settlement(hand: &Hand, dealer_hand: &Hand, winnings: i64) -> String {
    match hand.outcome(dealer_hand) {
        Outcome::BlackjackWin => format!("Won ${} by BlackJack!", winnings),
        Outcome::Win => format!("Won ${}!", winnings),
        Outcome::Loss => format!("Lost ${}.", winnings.unsigned_abs()),
        Outcome::Push => "Push.".to_string(),
    }
}
