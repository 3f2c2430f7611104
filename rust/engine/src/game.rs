use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandResult;
use crate::rules::{HAND_SIZE, MIN_BET};
use crate::session::SessionHistory;

/// Phases of a single video poker round.
///
/// `PreparingToDeal`, `Dealing`, `Drawing` and `Evaluating` are transient:
/// the engine passes through them inside one command and never rests there.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    PreparingToDeal,
    Dealing,
    Holding,
    Drawing,
    Evaluating,
    ResultShown,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::PreparingToDeal => "preparing to deal",
            Phase::Dealing => "dealing",
            Phase::Holding => "holding",
            Phase::Drawing => "drawing",
            Phase::Evaluating => "evaluating",
            Phase::ResultShown => "showing result",
            Phase::GameOver => "game over",
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Phase::PreparingToDeal | Phase::Dealing | Phase::Drawing | Phase::Evaluating
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Held hand positions as a bit mask; bit `i` set holds card `i`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldMask(u8);

impl HoldMask {
    pub fn none() -> Self {
        Self(0)
    }

    /// Panics in debug builds when `position` is outside the hand; callers
    /// validate first.
    pub fn toggle(&mut self, position: usize) -> bool {
        debug_assert!(position < HAND_SIZE);
        self.0 ^= 1 << position;
        self.is_held(position)
    }

    pub fn is_held(&self, position: usize) -> bool {
        position < HAND_SIZE && self.0 & (1 << position) != 0
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..HAND_SIZE).filter(move |&i| self.is_held(i))
    }

    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl FromIterator<usize> for HoldMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = HoldMask::none();
        for p in iter.into_iter().filter(|&p| p < HAND_SIZE) {
            mask.0 |= 1 << p;
        }
        mask
    }
}

/// Observable state of the video poker table. Owned and mutated only by
/// [`crate::engine::Engine`]; everyone else sees it through a shared
/// reference or a clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current phase of the round
    pub phase: Phase,
    /// Player bankroll
    pub credits: u32,
    /// Credits wagered on the next (or current) round, 1 through 5
    pub bet: u32,
    /// Dealt hand; empty until the first deal of a round
    pub hand: Vec<Card>,
    /// Positions the player keeps on the draw
    pub holds: HoldMask,
    /// Evaluation of the last completed round
    pub last_result: Option<HandResult>,
    /// User-facing message for the last rejected command
    pub error: Option<String>,
    /// Round number the next evaluation will be recorded under, from 1
    pub round: u32,
    /// Completed rounds of the current session
    pub history: SessionHistory,
}

impl RoundState {
    pub fn new(credits: u32) -> Self {
        Self {
            phase: Phase::Idle,
            credits,
            bet: MIN_BET,
            hand: Vec::with_capacity(HAND_SIZE),
            holds: HoldMask::none(),
            last_result: None,
            error: None,
            round: 1,
            history: SessionHistory::default(),
        }
    }

    /// Clears everything a finished round leaves behind.
    pub(crate) fn clear_round(&mut self) {
        self.hand.clear();
        self.holds.clear();
        self.last_result = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_mask_toggles() {
        let mut m = HoldMask::none();
        assert!(m.toggle(0));
        assert!(m.toggle(3));
        assert_eq!(m.positions().collect::<Vec<_>>(), vec![0, 3]);
        assert!(!m.toggle(0));
        assert_eq!(m.count(), 1);
        assert_eq!(m.bits(), 0b01000);
    }

    #[test]
    fn hold_mask_from_positions_ignores_out_of_range() {
        let m: HoldMask = [1, 4, 7].into_iter().collect();
        assert_eq!(m.positions().collect::<Vec<_>>(), vec![1, 4]);
        assert!(!m.is_held(7));
    }

    #[test]
    fn new_state_starts_idle_at_minimum_bet() {
        let s = RoundState::new(100);
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.bet, 1);
        assert_eq!(s.round, 1);
        assert!(s.hand.is_empty());
        assert!(s.history.is_empty());
    }

    #[test]
    fn transient_phases() {
        assert!(Phase::Dealing.is_transient());
        assert!(!Phase::Holding.is_transient());
        assert!(!Phase::GameOver.is_transient());
    }
}
