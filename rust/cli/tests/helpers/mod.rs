//! Shared helpers for the CLI integration tests. Commands run in-process
//! through `drawpoker_cli::run` with captured streams.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use drawpoker_engine::engine::Engine;
use drawpoker_engine::logger::RoundLogger;
use drawpoker_engine::session::SessionConfig;

#[derive(Debug)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["drawpoker"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = drawpoker_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Plays `rounds` seeded rounds with the built-in strategy and logs them
/// to `dir/name`. Returns the log path.
pub fn write_round_log(dir: &Path, name: &str, seed: u64, rounds: u32) -> PathBuf {
    let path = dir.join(name);
    let logger = RoundLogger::create(&path, Some(seed)).unwrap();
    let config = SessionConfig {
        starting_credits: 100,
        max_rounds: Some(rounds),
    };
    let mut eng = Engine::new(config, Some(seed));
    eng.add_sink(Box::new(logger));
    for _ in 0..rounds {
        drawpoker_cli::autoplay::play_round(&mut eng).unwrap();
        let _ = eng.proceed_after_result();
    }
    path
}
