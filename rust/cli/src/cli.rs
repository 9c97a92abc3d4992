//! Command-line argument definitions.

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blackjack", version, about = "Casino blackjack at the terminal")]
pub struct BlackjackCli {
    /// Log engine progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sit down at the table and play interactively
    Play {
        /// Number of seated players; asked for when omitted
        #[arg(long)]
        players: Option<usize>,
        /// Deck seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many rounds
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// Let automated seats play and print the outcome
    Sim {
        #[arg(long, default_value_t = 3)]
        seats: usize,
        #[arg(long, default_value = "basic", value_parser = PossibleValuesParser::new(blackjack_ai::STRATEGIES))]
        strategy: String,
        #[arg(long, default_value_t = 100)]
        rounds: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
