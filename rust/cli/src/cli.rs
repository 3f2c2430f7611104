//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "drawpoker",
    version,
    about = "Jacks-or-Better video poker: play, simulate and evaluate hands"
)]
pub struct DrawPokerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a session at the video poker table
    Play {
        /// Starting bankroll
        #[arg(long)]
        credits: Option<u32>,
        /// Rounds in the session (0 plays until the bankroll runs out)
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Let the built-in strategy play every round
        #[arg(long)]
        auto: bool,
        /// Pause between revealed cards, in milliseconds
        #[arg(long)]
        deal_delay_ms: Option<u64>,
        /// Append completed rounds to a JSONL file
        #[arg(long)]
        log: Option<String>,
    },
    /// Run automated sessions and report return and hand frequencies
    Sim {
        #[arg(long)]
        sessions: u32,
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        bet: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write every round to a JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Deal and evaluate a single hand
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate a hand such as "AH KH QH JH TH"
    Eval {
        #[arg(long)]
        hand: String,
        #[arg(long, default_value_t = 1)]
        bet: u32,
    },
    /// Print the pay table
    Paytable,
    /// Summarize a JSONL round log (plain or .zst)
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
