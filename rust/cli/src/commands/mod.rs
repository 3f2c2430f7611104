//! One handler per subcommand. Every handler writes to the streams it is
//! given and returns `Result<(), CliError>`; exit codes are decided in
//! [`crate::run`].

mod cfg;
mod deal;
mod eval;
mod paytable;
mod play;
mod sim;
mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use paytable::handle_paytable_command;
pub use play::{PlayOptions, handle_play_command};
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
