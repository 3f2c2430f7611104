//! # DrawPoker CLI Library
//!
//! Command-line front end for the Jacks-or-Better engine in
//! `drawpoker_engine`: an interactive table, an automated simulator and a
//! few inspection tools.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a subcommand and returns the
//! process exit code. Output streams are passed in so the whole CLI can be
//! driven from tests.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["drawpoker", "play", "--auto", "--rounds", "10"];
//! let code = drawpoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: play a session at the table, interactively or with `--auto`
//! - `sim`: run many automated sessions and report the return
//! - `deal`: deal a single hand for inspection
//! - `eval`: evaluate a hand given on the command line
//! - `paytable`: print the pay table
//! - `stats`: summarize JSONL round logs
//! - `cfg`: show the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod autoplay;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, DrawPokerCli};
use commands::{
    PlayOptions, handle_cfg_command, handle_deal_command, handle_eval_command,
    handle_paytable_command, handle_play_command, handle_sim_command, handle_stats_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "eval", "paytable", "stats", "cfg"];

/// Parses `args` and runs the selected subcommand.
///
/// Returns `0` on success, `2` on any error and `130` when a simulation is
/// interrupted. Help and version text go to `out` with exit code `0`.
///
/// ```
/// use std::io;
/// let args = vec!["drawpoker", "deal", "--seed", "42"];
/// let code = drawpoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DrawPokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            credits,
            rounds,
            seed,
            auto,
            deal_delay_ms,
            log,
        } => {
            let opts = PlayOptions {
                credits,
                rounds,
                seed,
                auto,
                deal_delay_ms,
                log,
            };
            let stdin = std::io::stdin();
            let mut lock = stdin.lock();
            handle_play_command(&opts, out, err, &mut lock)
        }
        Commands::Sim {
            sessions,
            rounds,
            bet,
            seed,
            output,
        } => handle_sim_command(sessions, rounds, bet, seed, output, out, err),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Eval { hand, bet } => handle_eval_command(&hand, bet, out, err),
        Commands::Paytable => handle_paytable_command(out),
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut text = format!(
        "{}\nDrawPoker video poker\nUsage: drawpoker <command> [options]\n\nCommands:\n",
        e
    );
    for c in COMMANDS {
        text.push_str(&format!("  {}\n", c));
    }
    text.push_str("\nFor full help, run: drawpoker --help");
    let _ = writeln!(err, "{}", text);
    exit_code::ERROR
}
