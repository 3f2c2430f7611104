use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::Card;
use crate::events::RoundSink;
use crate::hand::HandCategory;
use crate::session::RoundResult;

/// One completed round as written to the JSONL round log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Seed of the deck source, when the session is reproducible
    pub seed: Option<u64>,
    /// Round number within its session
    pub round: u32,
    /// Final hand after the draw
    pub hand: Vec<Card>,
    pub category: HandCategory,
    pub bet: u32,
    pub payout: u32,
    pub credits_after: u32,
    /// RFC3339 timestamp; filled in on write when missing
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_result(round_id: String, seed: Option<u64>, result: &RoundResult) -> Self {
        Self {
            round_id,
            seed,
            round: result.round,
            hand: result.hand.clone(),
            category: result.category,
            bet: result.bet,
            payout: result.payout,
            credits_after: result.credits_after,
            ts: Some(result.timestamp.clone()),
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends completed rounds to a JSONL file, one object per line.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    seed: Option<u64>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P, seed: Option<u64>) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            seed,
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers rounds but writes nowhere.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            seed: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    /// Seed stamped on subsequent records.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

impl RoundSink for RoundLogger {
    fn round_completed(&mut self, result: &RoundResult) {
        let id = self.next_id();
        let record = RoundRecord::from_result(id, self.seed, result);
        if let Err(e) = self.write(&record) {
            warn!(round_id = %record.round_id, error = %e, "failed to write round record");
        }
    }
}
