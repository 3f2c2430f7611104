//! Multi-round sessions: configuration, the append-only round history and
//! the end-of-session summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandCategory;

/// Credits a new session starts with.
pub const DEFAULT_STARTING_CREDITS: u32 = 100;
/// Rounds in a default session.
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Bankroll restored on every new session
    pub starting_credits: u32,
    /// Rounds before the session ends; `None` plays until the bankroll
    /// can no longer cover the bet
    pub max_rounds: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_credits: DEFAULT_STARTING_CREDITS,
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.starting_credits == 0 {
            return Err("starting_credits must be > 0".into());
        }
        if self.max_rounds == Some(0) {
            return Err("max_rounds must be >= 1".into());
        }
        Ok(())
    }
}

/// One completed round. Created once at evaluation time and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub hand: Vec<Card>,
    pub category: HandCategory,
    pub bet: u32,
    pub payout: u32,
    /// Bankroll once the payout is credited
    pub credits_after: u32,
    /// RFC3339 UTC time of evaluation
    pub timestamp: String,
}

impl RoundResult {
    /// Credit change caused by this round, stake included.
    pub fn net(&self) -> i64 {
        i64::from(self.payout) - i64::from(self.bet)
    }
}

/// Append-only log of the rounds played in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    rounds: Vec<RoundResult>,
}

impl SessionHistory {
    pub(crate) fn push(&mut self, result: RoundResult) {
        self.rounds.push(result);
    }

    pub(crate) fn reset(&mut self) {
        self.rounds.clear();
    }

    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&RoundResult> {
        self.rounds.last()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn total_wagered(&self) -> u64 {
        self.rounds.iter().map(|r| u64::from(r.bet)).sum()
    }

    pub fn total_payout(&self) -> u64 {
        self.rounds.iter().map(|r| u64::from(r.payout)).sum()
    }

    pub fn net(&self) -> i64 {
        self.rounds.iter().map(RoundResult::net).sum()
    }

    pub fn summarize(&self, final_credits: u32) -> SessionSummary {
        SessionSummary {
            rounds_played: self.rounds.len() as u32,
            hands_won: self.rounds.iter().filter(|r| r.payout > 0).count() as u32,
            royal_flushes: self
                .rounds
                .iter()
                .filter(|r| r.category == HandCategory::RoyalFlush)
                .count() as u32,
            total_wagered: self.total_wagered(),
            total_payout: self.total_payout(),
            net: self.net(),
            best_hand: self
                .rounds
                .iter()
                .map(|r| r.category)
                .min_by_key(|c| c.priority()),
            final_credits,
        }
    }
}

/// End-of-session totals handed to sinks and shown on the game-over screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub rounds_played: u32,
    pub hands_won: u32,
    pub royal_flushes: u32,
    pub total_wagered: u64,
    pub total_payout: u64,
    pub net: i64,
    pub best_hand: Option<HandCategory>,
    pub final_credits: u32,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rounds played: {}", self.rounds_played)?;
        writeln!(f, "Hands won: {}", self.hands_won)?;
        writeln!(f, "Total bet: {}", self.total_wagered)?;
        writeln!(f, "Total won: {}", self.total_payout)?;
        writeln!(f, "Net: {:+}", self.net)?;
        if let Some(best) = self.best_hand {
            writeln!(f, "Best hand: {}", best)?;
        }
        write!(f, "Final credits: {}", self.final_credits)
    }
}
