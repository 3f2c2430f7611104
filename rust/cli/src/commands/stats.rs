//! Statistics over JSONL round logs.
//!
//! Accepts a single file or a directory searched recursively for `.jsonl`
//! and `.jsonl.zst` files. Each record's hand is re-evaluated and its
//! category and payout are checked against the pay table; a mismatch fails
//! the command after the report is printed.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, json};

use drawpoker_engine::hand::{HandCategory, evaluate};
use drawpoker_engine::logger::RoundRecord;

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;

#[derive(Default)]
struct StatsState {
    rounds: u64,
    wagered: u64,
    payout: u64,
    wins: u64,
    counts: [u64; HandCategory::ALL.len()],
    first: Option<DateTime<FixedOffset>>,
    last: Option<DateTime<FixedOffset>>,
    skipped: u64,
    corrupted: u64,
    mismatched: u64,
}

impl StatsState {
    fn add(&mut self, rec: &RoundRecord) {
        self.rounds += 1;
        self.wagered += u64::from(rec.bet);
        self.payout += u64::from(rec.payout);
        if rec.payout > 0 {
            self.wins += 1;
        }
        self.counts[rec.category.priority()] += 1;
        if let Some(ts) = rec
            .ts
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        {
            self.first = Some(self.first.map_or(ts, |f| f.min(ts)));
            self.last = Some(self.last.map_or(ts, |l| l.max(ts)));
        }
    }

    fn consume(&mut self, content: &str, err: &mut dyn Write) -> Result<(), CliError> {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            let rec: RoundRecord = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(_) => {
                    if i == lines.len() - 1 && !has_trailing_nl {
                        self.skipped += 1;
                    } else {
                        self.corrupted += 1;
                    }
                    continue;
                }
            };
            let actual = evaluate(&rec.hand).category;
            if actual != rec.category {
                self.mismatched += 1;
                ui::write_error(
                    err,
                    &format!(
                        "Category mismatch at round {}: recorded {} but the hand is {}",
                        rec.round_id, rec.category, actual
                    ),
                )?;
            }
            let expected = rec.category.multiplier().saturating_mul(rec.bet);
            if rec.payout != expected {
                self.mismatched += 1;
                ui::write_error(
                    err,
                    &format!(
                        "Payout mismatch at round {}: {} for {} at bet {}, expected {}",
                        rec.round_id, rec.payout, rec.category, rec.bet, expected
                    ),
                )?;
            }
            self.add(&rec);
        }
        Ok(())
    }

    fn return_pct(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.payout as f64 / self.wagered as f64 * 100.0
        }
    }
}

pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    let mut state = StatsState::default();

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let Ok(rd) = std::fs::read_dir(&d) else {
                continue;
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => state.consume(&content, err)?,
                        Err(_) => state.corrupted += 1,
                    }
                }
            }
        }
    } else {
        match read_text_auto(&input) {
            Ok(content) => state.consume(&content, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.rounds == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let mut categories = Map::new();
    for category in HandCategory::ALL {
        categories.insert(
            category.name().to_string(),
            json!(state.counts[category.priority()]),
        );
    }
    let summary = json!({
        "rounds": state.rounds,
        "wins": state.wins,
        "total_bet": state.wagered,
        "total_won": state.payout,
        "net": state.payout as i64 - state.wagered as i64,
        "return_pct": (state.return_pct() * 100.0).round() / 100.0,
        "categories": categories,
        "first_ts": state.first.map(|t| t.to_rfc3339()),
        "last_ts": state.last.map(|t| t.to_rfc3339()),
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if state.mismatched > 0 {
        return Err(CliError::InvalidInput(format!(
            "{} record(s) disagree with the pay table",
            state.mismatched
        )));
    }
    Ok(())
}
