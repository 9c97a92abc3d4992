//! Input parsing and validation for interactive prompts.
//!
//! Every parser returns a [`ParseResult`] so the prompt loop can tell a
//! usable value from a quit request from input worth re-prompting for.

use blackjack_engine::player::{Action, TurnOptions};

#[derive(Debug, PartialEq)]
pub enum ParseResult<T> {
    Value(T),
    /// `q` or `quit`
    Quit,
    Invalid(String),
}

fn is_quit(input: &str) -> bool {
    matches!(input, "q" | "quit")
}

/// The turn prompt listing only the actions open to the hand.
///
/// ```rust
/// # use blackjack_cli::validation::turn_prompt;
/// use blackjack_engine::player::TurnOptions;
///
/// assert_eq!(turn_prompt(TurnOptions::default()), "Hit/Stand {h/s}: ");
/// let all = TurnOptions { double_down: true, split: true };
/// assert_eq!(turn_prompt(all), "Hit/Stand/Double-Down/Split {h/s/d/sp}: ");
/// ```
pub fn turn_prompt(options: TurnOptions) -> String {
    let mut names = String::from("Hit/Stand");
    let mut keys = String::from("h/s");
    if options.double_down {
        names.push_str("/Double-Down");
        keys.push_str("/d");
    }
    if options.split {
        names.push_str("/Split");
        keys.push_str("/sp");
    }
    format!("{} {{{}}}: ", names, keys)
}

/// Parses a turn choice, rejecting actions the hand may not take.
///
/// ```rust
/// # use blackjack_cli::validation::{parse_turn_action, ParseResult};
/// use blackjack_engine::player::{Action, TurnOptions};
///
/// let opts = TurnOptions::default();
/// assert_eq!(parse_turn_action("h", opts), ParseResult::Value(Action::Hit));
/// assert_eq!(parse_turn_action("Stand", opts), ParseResult::Value(Action::Stand));
/// assert_eq!(parse_turn_action("q", opts), ParseResult::Quit);
/// assert!(matches!(parse_turn_action("d", opts), ParseResult::Invalid(_)));
/// ```
pub fn parse_turn_action(input: &str, options: TurnOptions) -> ParseResult<Action> {
    let input = input.trim().to_lowercase();
    if is_quit(&input) {
        return ParseResult::Quit;
    }
    let action = match input.as_str() {
        "h" | "hit" => Action::Hit,
        "s" | "stand" => Action::Stand,
        "d" | "double" | "double-down" => Action::DoubleDown,
        "sp" | "split" => Action::Split,
        "" => return ParseResult::Invalid("Empty input".to_string()),
        other => {
            return ParseResult::Invalid(format!(
                "Unrecognized action '{}'. Valid actions: {}",
                other,
                turn_prompt(options).trim_end_matches(": ")
            ));
        }
    };
    if options.allows(action) {
        ParseResult::Value(action)
    } else {
        ParseResult::Invalid(format!("{:?} is not available for this hand", action))
    }
}

/// Parses a wager in `min..=max`.
pub fn parse_bet(input: &str, min: u32, max: u32) -> ParseResult<i64> {
    let input = input.trim();
    if is_quit(&input.to_lowercase()) {
        return ParseResult::Quit;
    }
    match input.parse::<i64>() {
        Ok(bet) if bet >= i64::from(min) && bet <= i64::from(max) => ParseResult::Value(bet),
        Ok(bet) => ParseResult::Invalid(format!("Bet must be between {} and {}, got {}", min, max, bet)),
        Err(_) => ParseResult::Invalid(format!("Invalid bet amount '{}'", input)),
    }
}

/// Parses the number of seated players in `1..=max`.
pub fn parse_player_count(input: &str, max: usize) -> ParseResult<usize> {
    let input = input.trim();
    if is_quit(&input.to_lowercase()) {
        return ParseResult::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) => match validate_player_count(n, max) {
            Ok(n) => ParseResult::Value(n),
            Err(msg) => ParseResult::Invalid(msg),
        },
        Err(_) => ParseResult::Invalid(format!("Invalid player count '{}'", input)),
    }
}

pub fn validate_player_count(count: usize, max: usize) -> Result<usize, String> {
    if (1..=max).contains(&count) {
        Ok(count)
    } else {
        Err(format!("Player count must be between 1 and {}", max))
    }
}

pub fn parse_player_name(input: &str) -> ParseResult<String> {
    let input = input.trim();
    if is_quit(&input.to_lowercase()) {
        ParseResult::Quit
    } else if input.is_empty() {
        ParseResult::Invalid("Name must not be empty".to_string())
    } else {
        ParseResult::Value(input.to_string())
    }
}
