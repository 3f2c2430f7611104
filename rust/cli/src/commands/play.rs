//! # Play Command
//!
//! A video poker table on the terminal. Commands are read line by line from
//! stdin (`deal`, `hold 1 3`, `draw`, `next`, ...); with `--auto` the
//! built-in strategy plays every round and stdin is not read.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use drawpoker_engine::engine::Engine;
use drawpoker_engine::errors::GameError;
use drawpoker_engine::game::Phase;
use drawpoker_engine::logger::RoundLogger;
use drawpoker_engine::rules::HAND_SIZE;

use crate::autoplay;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_card, format_hand, format_hand_with_holds, format_payout};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, PlayCommand, parse_command};

const HELP: &str = "\
Commands:
  deal (d)          deal a new hand
  hold N.. (h)      toggle hold on cards 1-5, bare numbers work too
  draw (r)          replace unheld cards
  next (n)          continue after a result
  bet N (b)         set the bet, 1-5
  + / -             raise or lower the bet by one
  new               start a new session after game over
  help (?)          show this list
  quit (q)          leave the table";

/// Command-line overrides for a play session. `None` falls back to the
/// resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub credits: Option<u32>,
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
    pub auto: bool,
    pub deal_delay_ms: Option<u64>,
    pub log: Option<String>,
}

pub fn handle_play_command(
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = match config::load_with_sources() {
        Ok(r) => r.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let mut session = cfg.session();
    if let Some(credits) = opts.credits {
        session.starting_credits = credits;
    }
    if let Some(rounds) = opts.rounds {
        session.max_rounds = (rounds > 0).then_some(rounds);
    }
    if let Err(msg) = session.validate() {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let delay = Duration::from_millis(opts.deal_delay_ms.unwrap_or(cfg.deal_delay_ms));

    let mut eng = Engine::new(session, Some(seed));
    if let Some(path) = &opts.log {
        let logger = RoundLogger::create(path, Some(seed)).map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to open round log: {}", e));
            CliError::Io(e)
        })?;
        eng.add_sink(Box::new(logger));
    }
    eng.place_bet(i64::from(cfg.bet))?;

    let rounds_text = match session.max_rounds {
        Some(n) => n.to_string(),
        None => "unlimited".to_string(),
    };
    writeln!(
        out,
        "play: credits={} rounds={} seed={}",
        session.starting_credits, rounds_text, seed
    )?;

    if opts.auto {
        if opts.deal_delay_ms.is_some() {
            ui::display_warning(err, "--deal-delay-ms has no effect with --auto")?;
        }
        run_auto(&mut eng, out)?;
    } else {
        writeln!(out, "Type 'help' for commands.")?;
        run_interactive(&mut eng, delay, out, err, stdin)?;
    }

    writeln!(out, "Session summary:")?;
    writeln!(out, "{}", eng.summary())?;
    Ok(())
}

fn run_auto(eng: &mut Engine, out: &mut dyn Write) -> Result<(), CliError> {
    loop {
        match eng.phase() {
            Phase::Idle => match autoplay::play_round(eng) {
                Ok(holds) => {
                    let s = eng.state();
                    let Some(last) = s.history.last() else {
                        return Err(CliError::Engine("round was not recorded".into()));
                    };
                    let held: Vec<String> = holds.positions().map(|p| (p + 1).to_string()).collect();
                    writeln!(
                        out,
                        "Round {}: {} | held [{}] | {} | credits {}",
                        last.round,
                        format_hand(&last.hand),
                        held.join(" "),
                        format_payout(last.category, last.bet),
                        s.credits
                    )?;
                }
                Err(GameError::InsufficientCredits { credits, bet }) => {
                    writeln!(out, "Out of credits: {} left, bet is {}", credits, bet)?;
                }
                Err(e) => return Err(e.into()),
            },
            Phase::ResultShown => eng.proceed_after_result()?,
            Phase::GameOver => {
                writeln!(out, "Game over.")?;
                return Ok(());
            }
            other => {
                return Err(CliError::Engine(format!(
                    "engine stopped in phase {}",
                    other
                )));
            }
        }
    }
}

fn run_interactive(
    eng: &mut Engine,
    delay: Duration,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    render(eng, out)?;
    loop {
        ui::prompt(out, "> ")?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        if line.is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            ParseResult::Command(cmd) => cmd,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };
        let cmd = match cmd {
            PlayCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            PlayCommand::Hold(positions) => match hold_positions(&positions) {
                Ok(p) => PlayCommand::Hold(p),
                Err(msg) => {
                    ui::write_error(err, &msg)?;
                    continue;
                }
            },
            other => other,
        };
        match apply(eng, &cmd) {
            Ok(()) => {
                if cmd == PlayCommand::Deal && !delay.is_zero() {
                    reveal(eng, delay, out)?;
                }
                render(eng, out)?
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                ui::write_error(err, &e.to_string())?;
                if eng.phase() == Phase::GameOver {
                    render(eng, out)?;
                }
            }
        }
    }
    Ok(())
}

/// Checks typed hold positions against the hand before any of them is
/// applied, so a bad entry never leaves a partial hold behind. Repeats are
/// collapsed; errors name the position 1-based as the player typed it.
fn hold_positions(positions: &[usize]) -> Result<Vec<usize>, String> {
    let mut unique = Vec::with_capacity(positions.len());
    for &p in positions {
        if p >= HAND_SIZE {
            return Err(format!(
                "Invalid hold position: {}, cards are numbered 1-{}",
                p + 1,
                HAND_SIZE
            ));
        }
        if !unique.contains(&p) {
            unique.push(p);
        }
    }
    Ok(unique)
}

fn apply(eng: &mut Engine, cmd: &PlayCommand) -> Result<(), GameError> {
    match cmd {
        PlayCommand::Deal => eng.deal(),
        PlayCommand::Draw => eng.draw(),
        PlayCommand::Hold(positions) => {
            for &p in positions {
                eng.toggle_hold(p)?;
            }
            Ok(())
        }
        PlayCommand::Bet(amount) => eng.place_bet(*amount),
        PlayCommand::BetUp => eng.adjust_bet(1),
        PlayCommand::BetDown => eng.adjust_bet(-1),
        PlayCommand::Next => eng.proceed_after_result(),
        PlayCommand::NewSession => eng.start_new_session(),
        PlayCommand::Help => Ok(()),
    }
}

/// Shows the dealt cards one at a time. Purely cosmetic: the engine has
/// already dealt the whole hand.
fn reveal(eng: &Engine, delay: Duration, out: &mut dyn Write) -> std::io::Result<()> {
    for card in &eng.state().hand {
        thread::sleep(delay);
        write!(out, "{} ", format_card(card))?;
        out.flush()?;
    }
    writeln!(out)
}

fn render(eng: &Engine, out: &mut dyn Write) -> std::io::Result<()> {
    let s = eng.state();
    match s.phase {
        Phase::Idle => writeln!(
            out,
            "Credits: {}  Bet: {}  Round: {}  (deal to play)",
            s.credits, s.bet, s.round
        ),
        Phase::Holding => {
            writeln!(out, "{}", format_hand_with_holds(&s.hand, &s.holds))?;
            writeln!(out, "Credits: {}  Bet: {}  (hold cards, then draw)", s.credits, s.bet)
        }
        Phase::ResultShown => {
            writeln!(out, "{}", format_hand(&s.hand))?;
            if let Some(result) = s.last_result {
                writeln!(out, "Result: {}", format_payout(result.category, s.bet))?;
            }
            writeln!(out, "Credits: {}  (next to continue)", s.credits)
        }
        Phase::GameOver => {
            if let Some(result) = s.last_result {
                writeln!(out, "{}", format_hand(&s.hand))?;
                writeln!(out, "Result: {}", format_payout(result.category, s.bet))?;
            }
            writeln!(out, "Game over. Credits: {}  (new to play again, q to quit)", s.credits)
        }
        other => writeln!(out, "[{}]", other),
    }
}
