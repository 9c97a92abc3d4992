//! `sim`: automated seats play a seeded session and the final bankrolls are
//! printed, one line per seat.
//!
//! ```text
//! sim: seats=2 strategy=basic rounds=100 seed=42
//! Rounds played: 100
//! Seat 1 (basic-1): $1130
//! Seat 2 (basic-2): eliminated
//! Survivors: 1/2
//! ```

use std::io::Write;

use blackjack_ai::create_strategy;
use blackjack_engine::engine::BlackjackGame;
use blackjack_engine::player::Player;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::validation::validate_player_count;

/// Seats at a full table.
const MAX_SEATS: usize = 7;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub seats: usize,
    pub strategy: String,
    pub rounds: u32,
    pub seed: Option<u64>,
}

pub fn handle_sim_command(
    opts: &SimOptions,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    validate_player_count(opts.seats, MAX_SEATS).map_err(CliError::InvalidInput)?;
    if opts.rounds == 0 {
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let seed = opts.seed.or(config.seed).unwrap_or_else(rand::random);
    writeln!(
        out,
        "sim: seats={} strategy={} rounds={} seed={}",
        opts.seats, opts.strategy, opts.rounds, seed
    )?;

    let mut game = BlackjackGame::new(Some(seed)).with_max_rounds(Some(opts.rounds));
    let names: Vec<String> = (1..=opts.seats)
        .map(|n| format!("{}-{}", opts.strategy, n))
        .collect();
    for name in &names {
        game.join(Player::with_cash(
            name.as_str(),
            config.starting_cash,
            create_strategy(&opts.strategy),
        ));
    }

    let summary = game.play_game()?;
    info!(rounds = summary.rounds_played, "simulation finished");

    writeln!(out, "Rounds played: {}", summary.rounds_played)?;
    for (idx, name) in names.iter().enumerate() {
        let seat = idx + 1;
        match summary.survivors.iter().find(|s| s.seat == seat) {
            Some(view) => writeln!(out, "Seat {} ({}): ${}", seat, name, view.cash)?,
            None => writeln!(out, "Seat {} ({}): eliminated", seat, name)?,
        }
    }
    writeln!(out, "Survivors: {}/{}", summary.survivors.len(), opts.seats)?;
    Ok(())
}
