mod helpers;

use drawpoker_cli::exit_code;
use drawpoker_engine::logger::RoundRecord;
use helpers::run_cli;

#[test]
fn auto_play_prints_each_round_and_a_summary() {
    let res = run_cli(&["play", "--auto", "--rounds", "8", "--seed", "11"]);
    assert_eq!(res.exit_code, exit_code::SUCCESS, "{}", res.stderr);
    assert!(res.stdout.starts_with("play: credits=100 rounds=8 seed=11"));
    let rounds: Vec<&str> = res
        .stdout
        .lines()
        .filter(|l| l.starts_with("Round "))
        .collect();
    assert_eq!(rounds.len(), 8);
    assert!(rounds[0].starts_with("Round 1: "));
    assert!(rounds[7].starts_with("Round 8: "));
    assert!(res.stdout.contains("Rounds played: 8"));
    assert!(res.stdout.contains("Total bet: 8"));
}

#[test]
fn auto_play_is_reproducible() {
    let args = ["play", "--auto", "--rounds", "15", "--seed", "99", "--credits", "40"];
    assert_eq!(run_cli(&args).stdout, run_cli(&args).stdout);
}

#[test]
fn final_credits_match_the_last_round() {
    let res = run_cli(&["play", "--auto", "--rounds", "6", "--seed", "3"]);
    let last_round = res
        .stdout
        .lines()
        .filter(|l| l.starts_with("Round "))
        .next_back()
        .unwrap();
    let credits = last_round.rsplit("credits ").next().unwrap().trim();
    assert!(res.stdout.contains(&format!("Final credits: {}", credits)));
}

#[test]
fn auto_play_can_log_rounds() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs").join("play.jsonl");
    let log_str = log.to_str().unwrap();
    let res = run_cli(&[
        "play", "--auto", "--rounds", "4", "--seed", "5", "--log", log_str,
    ]);
    assert_eq!(res.exit_code, exit_code::SUCCESS, "{}", res.stderr);

    let content = std::fs::read_to_string(&log).unwrap();
    let records: Vec<RoundRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.seed == Some(5)));
    assert_eq!(
        records.iter().map(|r| r.round).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    for r in &records {
        assert_eq!(r.hand.len(), 5);
        assert_eq!(r.payout, r.category.multiplier() * r.bet);
        assert!(r.ts.is_some());
    }
}

#[test]
fn zero_credits_flag_is_rejected() {
    let res = run_cli(&["play", "--auto", "--credits", "0"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("starting_credits must be > 0"));
}
