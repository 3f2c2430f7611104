//! Simulation command: plays many sessions with the built-in strategy and
//! reports the overall return and how often each hand came up.
//!
//! # Environment Variables
//!
//! - `DRAWPOKER_SIM_BREAK_AFTER`: stop after N sessions (for testing)

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use drawpoker_engine::engine::Engine;
use drawpoker_engine::game::Phase;
use drawpoker_engine::hand::HandCategory;
use drawpoker_engine::logger::RoundLogger;
use drawpoker_engine::rules::validate_bet;

use crate::autoplay;
use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;

const BREAK_AFTER_ENV: &str = "DRAWPOKER_SIM_BREAK_AFTER";

#[derive(Debug, Default)]
struct SimTotals {
    sessions: u32,
    rounds: u64,
    wagered: u64,
    payout: u64,
    busted: u32,
    counts: [u64; HandCategory::ALL.len()],
}

impl SimTotals {
    fn return_pct(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.payout as f64 / self.wagered as f64 * 100.0
        }
    }
}

pub fn handle_sim_command(
    sessions: u32,
    rounds: Option<u32>,
    bet: Option<u32>,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if sessions == 0 {
        ui::write_error(err, "sessions must be >= 1")?;
        return Err(CliError::InvalidInput("sessions must be >= 1".to_string()));
    }
    let cfg = config::load_with_sources()?.config;

    let mut session = cfg.session();
    let rounds = match rounds {
        Some(0) => {
            ui::write_error(err, "rounds must be >= 1")?;
            return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
        }
        Some(n) => n,
        None if cfg.max_rounds == 0 => {
            let msg = "sim needs a finite round count, but the configured max_rounds is 0 \
                       (unlimited); pass --rounds N";
            ui::write_error(err, msg)?;
            return Err(CliError::InvalidInput(msg.to_string()));
        }
        None => cfg.max_rounds,
    };
    session.max_rounds = Some(rounds);

    let bet = match validate_bet(i64::from(bet.unwrap_or(cfg.bet))) {
        Ok(b) => b,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::InvalidInput(e.to_string()));
        }
    };

    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut seeds = ChaCha20Rng::seed_from_u64(base_seed);

    let logger = match output.as_deref() {
        Some(path) => {
            if let Err(e) = ensure_parent_dir(Path::new(path)) {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
            match RoundLogger::create(path, None) {
                Ok(l) => Some(Arc::new(Mutex::new(l))),
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open {}: {}", path, e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.parse::<u32>().ok());

    writeln!(
        out,
        "sim: sessions={} rounds={} bet={} seed={}",
        sessions, rounds, bet, base_seed
    )?;

    let mut totals = SimTotals::default();
    for index in 0..sessions {
        let session_seed: u64 = seeds.random();
        let mut eng = Engine::new(session, Some(session_seed));
        if let Some(shared) = &logger {
            shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set_seed(Some(session_seed));
            eng.add_sink(Box::new(Arc::clone(shared)));
        }
        eng.place_bet(i64::from(bet))?;

        run_session(&mut eng)?;

        let state = eng.state();
        let history = &state.history;
        let delta = i64::from(state.credits) - i64::from(session.starting_credits);
        if delta != history.net() {
            return Err(CliError::Engine(format!(
                "credit mismatch in session {}: balance moved {} but rounds net {}",
                index + 1,
                delta,
                history.net()
            )));
        }
        debug!(session = index + 1, seed = session_seed, rounds = history.len(), "session simulated");

        totals.sessions += 1;
        totals.rounds += history.len() as u64;
        totals.wagered += history.total_wagered();
        totals.payout += history.total_payout();
        if state.credits < bet {
            totals.busted += 1;
        }
        for r in history.rounds() {
            totals.counts[r.category.priority()] += 1;
        }

        if let Some(b) = break_after
            && totals.sessions == b
            && totals.sessions < sessions
        {
            writeln!(out, "Interrupted: completed {}/{} sessions", totals.sessions, sessions)?;
            return Err(CliError::Interrupted(format!(
                "completed {}/{} sessions",
                totals.sessions, sessions
            )));
        }
    }

    report(&totals, out)?;
    Ok(())
}

/// Plays from `Idle` until the session is over, either by reaching the
/// round limit or by running out of credits.
fn run_session(eng: &mut Engine) -> Result<(), CliError> {
    loop {
        match eng.phase() {
            Phase::Idle => match autoplay::play_round(eng) {
                Ok(_) => {}
                Err(e) if eng.phase() == Phase::GameOver => {
                    debug!(error = %e, "session ended early");
                }
                Err(e) => return Err(e.into()),
            },
            Phase::ResultShown => eng.proceed_after_result()?,
            Phase::GameOver => return Ok(()),
            other => {
                return Err(CliError::Engine(format!(
                    "engine stopped in phase {}",
                    other
                )));
            }
        }
    }
}

fn report(totals: &SimTotals, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Simulated: {} sessions, {} rounds",
        totals.sessions, totals.rounds
    )?;
    writeln!(out, "Total bet: {}", totals.wagered)?;
    writeln!(out, "Total won: {}", totals.payout)?;
    writeln!(out, "Return: {:.2}%", totals.return_pct())?;
    writeln!(out, "Busted sessions: {}", totals.busted)?;
    writeln!(out, "Hands:")?;
    for category in HandCategory::ALL {
        let n = totals.counts[category.priority()];
        let pct = if totals.rounds == 0 {
            0.0
        } else {
            n as f64 / totals.rounds as f64 * 100.0
        };
        writeln!(out, "  {:<16}{:>8} ({:.2}%)", category.name(), n, pct)?;
    }
    Ok(())
}
