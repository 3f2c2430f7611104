//! Configuration layering. Every test here mutates process environment,
//! so all of them are serialized.

mod helpers;

use std::io::Write;

use drawpoker_cli::exit_code;
use helpers::run_cli;
use serial_test::serial;

const KEYS: &[&str] = &[
    "DRAWPOKER_CONFIG",
    "DRAWPOKER_SEED",
    "DRAWPOKER_CREDITS",
    "DRAWPOKER_ROUNDS",
    "DRAWPOKER_BET",
    "DRAWPOKER_DEAL_DELAY_MS",
];

struct EnvGuard;

impl EnvGuard {
    fn set(pairs: &[(&str, &str)]) -> Self {
        for key in KEYS {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in KEYS {
            unsafe { std::env::remove_var(key) };
        }
    }
}

fn cfg_json() -> serde_json::Value {
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, exit_code::SUCCESS, "{}", res.stderr);
    serde_json::from_str(&res.stdout).unwrap()
}

#[test]
#[serial]
fn defaults_are_reported_as_default() {
    let _env = EnvGuard::set(&[]);
    let json = cfg_json();
    assert_eq!(json["starting_credits"]["value"], 100);
    assert_eq!(json["starting_credits"]["source"], "default");
    assert_eq!(json["max_rounds"]["value"], 10);
    assert_eq!(json["bet"]["value"], 1);
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn env_overrides_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "starting_credits = 250\nbet = 3\nseed = 17").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let _env = EnvGuard::set(&[("DRAWPOKER_CONFIG", &path), ("DRAWPOKER_BET", "4")]);

    let json = cfg_json();
    assert_eq!(json["starting_credits"]["value"], 250);
    assert_eq!(json["starting_credits"]["source"], "file");
    assert_eq!(json["seed"]["value"], 17);
    assert_eq!(json["bet"]["value"], 4);
    assert_eq!(json["bet"]["source"], "env");
    assert_eq!(json["max_rounds"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_is_an_error() {
    let _env = EnvGuard::set(&[("DRAWPOKER_CREDITS", "lots")]);
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("Invalid value for DRAWPOKER_CREDITS: lots"));
}

#[test]
#[serial]
fn out_of_range_bet_is_an_error() {
    let _env = EnvGuard::set(&[("DRAWPOKER_BET", "9")]);
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("bet must be between 1 and 5"));
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "jackpot = true").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let _env = EnvGuard::set(&[("DRAWPOKER_CONFIG", &path)]);
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("cannot parse config file"));
}

#[test]
#[serial]
fn play_uses_configured_session() {
    let _env = EnvGuard::set(&[
        ("DRAWPOKER_SEED", "123"),
        ("DRAWPOKER_CREDITS", "30"),
        ("DRAWPOKER_ROUNDS", "2"),
        ("DRAWPOKER_BET", "2"),
    ]);
    let res = run_cli(&["play", "--auto"]);
    assert_eq!(res.exit_code, exit_code::SUCCESS, "{}", res.stderr);
    assert!(res.stdout.starts_with("play: credits=30 rounds=2 seed=123"));
    assert!(res.stdout.contains("Total bet: 4"));
}

#[test]
#[serial]
fn flags_override_configuration() {
    let _env = EnvGuard::set(&[("DRAWPOKER_ROUNDS", "2"), ("DRAWPOKER_SEED", "1")]);
    let res = run_cli(&["play", "--auto", "--rounds", "3", "--seed", "2"]);
    assert!(res.stdout.starts_with("play: credits=100 rounds=3 seed=2"));
    assert!(res.stdout.contains("Rounds played: 3"));
}

#[test]
#[serial]
fn zero_rounds_plays_until_broke() {
    let _env = EnvGuard::set(&[("DRAWPOKER_ROUNDS", "0"), ("DRAWPOKER_CREDITS", "3")]);
    let res = run_cli(&["play", "--auto", "--seed", "6"]);
    assert_eq!(res.exit_code, exit_code::SUCCESS, "{}", res.stderr);
    assert!(res.stdout.contains("rounds=unlimited"));
    assert!(res.stdout.contains("Game over."));
}
