//! Deals one hand from a fresh shuffle and shows what it would pay at the
//! minimum bet. Useful for checking that a seed reproduces.

use std::io::Write;

use drawpoker_engine::engine::Engine;
use drawpoker_engine::hand::evaluate;
use drawpoker_engine::session::SessionConfig;

use crate::error::CliError;
use crate::formatters::{format_hand, format_payout};

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut eng = Engine::new(SessionConfig::default(), Some(seed));
    eng.deal()?;
    let state = eng.state();
    let result = evaluate(&state.hand);

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Hand: {}", format_hand(&state.hand))?;
    writeln!(out, "Result: {}", format_payout(result.category, state.bet))?;
    Ok(())
}
