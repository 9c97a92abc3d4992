//! Command handlers, one module per subcommand.
//!
//! Each module exposes `handle_COMMAND_command(...) -> Result<_, CliError>`
//! taking its streams as `&mut dyn Write` (and `&mut dyn BufRead` for input)
//! so tests can drive it with in-memory buffers.

mod cfg;
mod play;
mod sim;

pub use cfg::handle_cfg_command;
pub use play::{PlayOptions, handle_play_command};
pub use sim::{SimOptions, handle_sim_command};
