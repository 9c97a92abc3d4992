//! # Blackjack CLI Library
//!
//! Command-line front end for the blackjack engine: an interactive console
//! table, automated simulations, and configuration inspection.
//!
//! ## Main Entry Points
//!
//! [`run`] reads player input from the process's stdin; [`run_with_input`]
//! takes any buffered reader, which is how the tests script a session.
//!
//! ```
//! use std::io::Cursor;
//!
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = blackjack_cli::run_with_input(
//!     ["blackjack", "sim", "--seats", "2", "--rounds", "5", "--seed", "42"],
//!     &mut Cursor::new(""),
//!     &mut out,
//!     &mut err,
//! );
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Rounds played: 5"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive table for 1 to `max_players` humans
//! - `sim`: Automated seats playing a seeded session
//! - `cfg`: Display the resolved configuration and value sources

use std::io::{BufRead, Write};

use clap::Parser;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
pub mod console;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{PlayOptions, SimOptions, handle_cfg_command, handle_play_command, handle_sim_command};

pub use error::CliError;

/// Runs the CLI against the real stdin. Returns the process exit code:
/// `0` on success, `2` on errors, `130` when the player quits.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`] with player input read from `stdin`.
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                write_or_exit!(out, "{}", e);
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: blackjack <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: blackjack --help");
            return exit_code::ERROR;
        }
    };

    logging::init_logging(cli.verbose);

    match dispatch(cli.cmd, stdin, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            if !matches!(e, CliError::Interrupted(_)) {
                write_or_exit!(err, "Error: {}", e);
            }
            e.exit_code()
        }
    }
}

fn dispatch(
    cmd: Commands,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Play {
            players,
            seed,
            rounds,
        } => {
            let resolved = config::load_with_sources()?.with_overrides(seed, rounds)?;
            handle_play_command(&PlayOptions { players }, &resolved.config, stdin, out, err)?;
            Ok(())
        }
        Commands::Sim {
            seats,
            strategy,
            rounds,
            seed,
        } => {
            let resolved = config::load_with_sources()?;
            let opts = SimOptions {
                seats,
                strategy,
                rounds,
                seed,
            };
            handle_sim_command(&opts, &resolved.config, out)
        }
    }
}
