//! # Play Command
//!
//! An interactive table session. Asks how many players sit down and their
//! names, then runs rounds until everyone is broke, the round limit is hit,
//! or a player types `q`.

use std::io::{BufRead, Write};
use std::rc::Rc;

use blackjack_engine::engine::{BlackjackGame, GameSummary};
use blackjack_engine::player::Player;
use tracing::info;

use crate::config::Config;
use crate::console::{Interactive, SharedTerminal, Terminal, attach_presenter};
use crate::error::CliError;
use crate::formatters::format_seat;
use crate::ui;
use crate::validation::{parse_player_count, parse_player_name, validate_player_count};

#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Skips the player-count prompt when set.
    pub players: Option<usize>,
}

/// Runs a console session. `config` already carries command-line overrides.
pub fn handle_play_command(
    opts: &PlayOptions,
    config: &Config,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<GameSummary, CliError> {
    if let Some(count) = opts.players
        && let Err(msg) = validate_player_count(count, config.max_players)
    {
        return Err(CliError::InvalidInput(msg));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    ui::header(out)?;
    writeln!(
        out,
        "play: seed={} rounds={}",
        seed,
        config
            .max_rounds
            .map_or_else(|| "unlimited".to_string(), |r| r.to_string())
    )?;

    let terminal = Terminal::new(stdin, out, err).shared();
    let result = run_session(opts, config, seed, &terminal);

    let mut terminal = terminal.borrow_mut();
    if let Some(e) = terminal.take_error() {
        return Err(CliError::Io(e));
    }
    if terminal.quit_requested() {
        info!("session ended by the player");
        return Err(CliError::Interrupted("player quit".to_string()));
    }
    let summary = result?;

    terminal.separator();
    terminal.line(format_args!("Rounds played: {}", summary.rounds_played));
    if summary.survivors.is_empty() {
        terminal.line("Everyone is out of cash. The house wins.");
    }
    for seat in &summary.survivors {
        terminal.line(format_args!("Player {}: {}", seat.seat, format_seat(seat)));
    }
    match terminal.take_error() {
        Some(e) => Err(CliError::Io(e)),
        None => Ok(summary),
    }
}

fn run_session<'a>(
    opts: &PlayOptions,
    config: &Config,
    seed: u64,
    terminal: &SharedTerminal<'a>,
) -> Result<GameSummary, CliError> {
    let Some(names) = ask_players(opts, config, terminal) else {
        return Err(CliError::Interrupted("player quit".to_string()));
    };

    let mut game = BlackjackGame::new(Some(seed)).with_max_rounds(config.max_rounds);
    for name in names {
        let human = Interactive::new(Rc::clone(terminal), config.min_bet);
        game.join(Player::with_cash(name, config.starting_cash, Box::new(human)));
    }
    attach_presenter(game.events(), terminal);

    Ok(game.play_game()?)
}

/// Player count (unless given on the command line) and one name per seat.
fn ask_players(opts: &PlayOptions, config: &Config, terminal: &SharedTerminal<'_>) -> Option<Vec<String>> {
    let mut t = terminal.borrow_mut();
    let count = match opts.players {
        Some(count) => count,
        None => {
            t.separator();
            let max = config.max_players;
            let count = t.prompt(&format!("How many players? {{1-{}}}: ", max), |s| {
                parse_player_count(s, max)
            })?;
            t.blank();
            count
        }
    };

    t.separator();
    let mut names = Vec::with_capacity(count);
    for seat in 1..=count {
        names.push(t.prompt(&format!("Player {}'s name: ", seat), parse_player_name)?);
    }
    t.blank();
    Some(names)
}
