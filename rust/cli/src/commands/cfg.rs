//! `cfg`: prints the resolved configuration with the source of each value.
//!
//! ```json
//! {
//!   "starting_cash": { "value": 1000, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "starting_cash": {
            "value": config.starting_cash,
            "source": sources.starting_cash,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "max_players": {
            "value": config.max_players,
            "source": sources.max_players,
        },
        "max_rounds": {
            "value": config.max_rounds,
            "source": sources.max_rounds,
        },
        "min_bet": {
            "value": config.min_bet,
            "source": sources.min_bet,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
