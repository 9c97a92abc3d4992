//! Console table: prints the game as it unfolds and asks seated humans for
//! their bets and moves.
//!
//! The engine knows nothing about the terminal. [`attach_presenter`] hooks
//! printing handlers onto the game's event bus and [`Interactive`] answers
//! the engine's decision requests by prompting. Both share one [`Terminal`].

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use blackjack_engine::cards::Card;
use blackjack_engine::events::{Event, EventBus, EventId};
use blackjack_engine::hand::Hand;
use blackjack_engine::player::{Action, Decide, SeatView, TurnOptions};

use crate::formatters::{format_card, format_hand, format_seat, format_settlement, format_total};
use crate::io_utils::read_stdin_line;
use crate::ui::SEPARATOR;
use crate::validation::{ParseResult, parse_bet, parse_turn_action, turn_prompt};

/// Input and output of a console session.
///
/// Event handlers cannot return errors, so the first write failure is kept
/// and reported once the game returns. After a quit the terminal goes
/// silent and every prompt answers `None` without reading.
pub struct Terminal<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    error: Option<io::Error>,
    quit: bool,
}

pub type SharedTerminal<'a> = Rc<RefCell<Terminal<'a>>>;

impl<'a> Terminal<'a> {
    pub fn new(input: &'a mut dyn BufRead, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self {
            input,
            out,
            err,
            error: None,
            quit: false,
        }
    }

    pub fn shared(self) -> SharedTerminal<'a> {
        Rc::new(RefCell::new(self))
    }

    pub fn line(&mut self, text: impl Display) {
        if self.quit || self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", text) {
            self.error = Some(e);
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn separator(&mut self) {
        self.line(SEPARATOR);
    }

    /// Asks until `parse` accepts the answer. Rejections go to stderr.
    /// Returns `None` once the user quits or input runs out.
    pub fn prompt<T>(&mut self, message: &str, parse: impl Fn(&str) -> ParseResult<T>) -> Option<T> {
        while !self.quit && self.error.is_none() {
            let shown = write!(self.out, "{}", message).and_then(|()| self.out.flush());
            if let Err(e) = shown {
                self.error = Some(e);
                break;
            }
            let Some(answer) = read_stdin_line(self.input) else {
                tracing::info!("input closed at prompt");
                self.quit = true;
                break;
            };
            match parse(&answer) {
                ParseResult::Value(v) => return Some(v),
                ParseResult::Quit => {
                    tracing::info!("player quit");
                    self.quit = true;
                }
                ParseResult::Invalid(msg) => {
                    if let Err(e) = crate::ui::write_error(self.err, &msg) {
                        self.error = Some(e);
                    }
                }
            }
        }
        None
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The first write failure, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

/// A human at the keyboard.
///
/// After a quit it bets nothing, which the engine rejects, ending the game
/// before another hand is dealt. Turns still in progress stand.
pub struct Interactive<'a> {
    terminal: SharedTerminal<'a>,
    min_bet: u32,
}

impl<'a> Interactive<'a> {
    pub fn new(terminal: SharedTerminal<'a>, min_bet: u32) -> Self {
        Self { terminal, min_bet }
    }
}

impl Decide for Interactive<'_> {
    fn place_bet(&mut self, seat: &SeatView) -> i64 {
        let max = seat.available_cash;
        let min = self.min_bet.clamp(1, max.max(1));
        let message = format!("Place your bet {{{}-{}}}: ", min, max);
        self.terminal
            .borrow_mut()
            .prompt(&message, |answer| parse_bet(answer, min, max))
            .unwrap_or(0)
    }

    fn take_turn(&mut self, _hand: &Hand, options: TurnOptions, _dealer_up_card: Option<Card>) -> Action {
        self.terminal
            .borrow_mut()
            .prompt(&turn_prompt(options), |answer| parse_turn_action(answer, options))
            .unwrap_or(Action::Stand)
    }
}

/// Registers the printing handlers on `events`.
pub fn attach_presenter<'a>(events: &EventBus<'a>, terminal: &SharedTerminal<'a>) {
    let show = |id: EventId, print: fn(&mut Terminal<'_>, &Event)| {
        let terminal = Rc::clone(terminal);
        events.register(id, move |event| print(&mut terminal.borrow_mut(), event));
    };

    show(EventId::PreRound, |t, e| {
        if let Event::Table { round, .. } = e {
            t.blank();
            t.line(format_args!("Round {}", round));
        }
    });
    show(EventId::PrePlayerBet, |t, e| {
        if let Event::PlayerBet { player, .. } = e {
            t.separator();
            t.line(format_args!("Player {}: {}", player.seat, format_seat(player)));
        }
    });
    show(EventId::PostPlayerBet, |t, e| {
        if let Event::PlayerBet { bet: Some(bet), .. } = e {
            t.blank();
            t.line(format_args!("You bet ${}. Thank you.", bet));
            t.blank();
        }
    });
    show(EventId::PrePlayerPlay, |t, e| {
        if let Event::PlayerPlay { player } = e {
            t.separator();
            t.line(format_args!("Player {}: {}", player.seat, format_seat(player)));
        }
    });
    show(EventId::PrePlayerPlayHandTurn, |t, e| {
        if let Event::PlayerHand {
            hand,
            dealer_up_card,
            ..
        } = e
        {
            if let Some(up) = dealer_up_card {
                t.line(format_args!("  Dealer shows: {}", format_card(up)));
            }
            print_hand(t, hand);
            t.blank();
        }
    });
    show(EventId::PostPlayerPlayHandTurn, |t, _| t.blank());
    show(EventId::PostPlayerPlayHand, |t, e| {
        if let Event::PlayerHand { hand, .. } = e {
            if hand.is_invalid() {
                t.line("  Split!");
                t.blank();
                return;
            }
            print_hand(t, hand);
            t.blank();
            t.line(if hand.is_busted() { "  BUST!" } else { "  Standing..." });
            t.blank();
        }
    });
    show(EventId::PreDeterminePlayerWin, |t, e| {
        if let Event::DeterminePlayerWin { player, dealer } = e {
            t.separator();
            t.line(format_args!("Player {}: {}", player.seat, format_seat(player)));
            t.line(format_args!("  Previous Cash: ${}", player.cash));
            t.blank();
            if let Some(dealer_hand) = dealer.hands.first() {
                t.line(format_args!("  Dealer Hand: {}", format_hand(dealer_hand)));
                t.line(format_args!("  Dealer Total: {}", format_total(dealer_hand.total())));
            }
            t.blank();
        }
    });
    show(EventId::PostDeterminePlayersHandWin, |t, e| {
        if let Event::HandSettlement {
            hand,
            dealer_hand,
            winnings: Some(winnings),
            ..
        } = e
        {
            print_hand(t, hand);
            t.line(format_args!("    {}", format_settlement(hand, dealer_hand, *winnings)));
            t.blank();
        }
    });
    show(EventId::PostDeterminePlayerWin, |t, e| {
        if let Event::DeterminePlayerWin { player, .. } = e {
            t.line(format_args!("  Post Cash: ${}", player.cash));
            t.blank();
            if player.cash == 0 {
                t.line(format_args!("Player {} loses...", player.seat));
                t.blank();
            }
        }
    });
}

fn print_hand(t: &mut Terminal<'_>, hand: &Hand) {
    t.line(format_args!("  Hand: {}", format_hand(hand)));
    t.line(format_args!("  Total: {}", format_total(hand.total())));
}
