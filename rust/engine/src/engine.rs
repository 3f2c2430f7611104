use std::fmt;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, error, info, warn};

use crate::cards::Card;
use crate::deck::{Deck, DeckSource, SeededShuffle};
use crate::errors::GameError;
use crate::events::{Feedback, RoundSink};
use crate::game::{Phase, RoundState};
use crate::hand::evaluate;
use crate::rules::{adjusted_bet, check_affordable, validate_bet, HAND_SIZE, MIN_BET};
use crate::session::{RoundResult, SessionConfig, SessionSummary};

/// Round state machine for a single-player Jacks-or-Better table.
///
/// Every command either advances the state and returns `Ok(())`, or leaves
/// the state where it was, records a message in [`RoundState::error`] and
/// returns the error.
///
/// # Examples
///
/// ```
/// use drawpoker_engine::engine::Engine;
/// use drawpoker_engine::game::Phase;
/// use drawpoker_engine::session::SessionConfig;
///
/// let mut engine = Engine::new(SessionConfig::default(), Some(42));
/// engine.place_bet(3).unwrap();
/// engine.deal().unwrap();
/// assert_eq!(engine.state().phase, Phase::Holding);
/// assert_eq!(engine.state().credits, 97);
///
/// engine.toggle_hold(0).unwrap();
/// engine.draw().unwrap();
/// assert_eq!(engine.state().phase, Phase::ResultShown);
/// assert_eq!(engine.state().history.len(), 1);
/// ```
pub struct Engine {
    state: RoundState,
    /// Deck for the current round
    deck: Deck,
    decks: Box<dyn DeckSource>,
    config: SessionConfig,
    feedback: Option<Box<dyn Feedback>>,
    sinks: Vec<Box<dyn RoundSink>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("deck_remaining", &self.deck.remaining())
            .field("config", &self.config)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Engine {
    /// Creates an engine shuffling with ChaCha20. A seed makes every deck
    /// of the session reproducible.
    pub fn new(config: SessionConfig, seed: Option<u64>) -> Self {
        let source = match seed {
            Some(s) => SeededShuffle::new(s),
            None => SeededShuffle::from_entropy(),
        };
        Self::with_deck_source(config, Box::new(source))
    }

    pub fn with_deck_source(config: SessionConfig, mut decks: Box<dyn DeckSource>) -> Self {
        let deck = decks.next_deck();
        Self {
            state: RoundState::new(config.starting_credits),
            deck,
            decks,
            config,
            feedback: None,
            sinks: Vec::new(),
        }
    }

    pub fn with_feedback(mut self, feedback: Box<dyn Feedback>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn RoundSink>) {
        self.sinks.push(sink);
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn summary(&self) -> SessionSummary {
        self.state.history.summarize(self.state.credits)
    }

    /// Nudges the bet up or down, pinned to the table limits.
    pub fn adjust_bet(&mut self, delta: i32) -> Result<(), GameError> {
        self.require(Phase::Idle, "change the bet")?;
        self.state.bet = adjusted_bet(self.state.bet, delta);
        self.state.error = None;
        debug!(bet = self.state.bet, "bet adjusted");
        Ok(())
    }

    /// Sets the bet to an exact amount. Out-of-range amounts are rejected
    /// rather than clamped.
    pub fn place_bet(&mut self, amount: i64) -> Result<(), GameError> {
        self.require(Phase::Idle, "change the bet")?;
        match validate_bet(amount) {
            Ok(bet) => {
                self.state.bet = bet;
                self.state.error = None;
                debug!(bet, "bet placed");
                Ok(())
            }
            Err(e) => self.reject(e),
        }
    }

    /// Debits the bet and deals five cards from a freshly shuffled deck.
    ///
    /// Guards run in order: phase, bankroll, bet range. A bankroll that
    /// cannot cover the bet ends the session. A deck that fails its
    /// integrity check aborts the deal before any credits move.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.require(Phase::Idle, "deal")?;
        if let Err(e) = check_affordable(self.state.credits, self.state.bet) {
            self.transition(Phase::GameOver);
            self.finish_session();
            return self.reject(e);
        }
        if let Err(e) = validate_bet(i64::from(self.state.bet)) {
            return self.reject(e);
        }

        self.transition(Phase::PreparingToDeal);
        self.state.clear_round();
        let deck = self.decks.next_deck();
        if let Err(issue) = deck.validate() {
            self.transition(Phase::Idle);
            return self.reject(GameError::DeckIntegrity(issue));
        }
        self.deck = deck;

        self.transition(Phase::Dealing);
        let mut hand = Vec::with_capacity(HAND_SIZE);
        for _ in 0..HAND_SIZE {
            match self.deck.draw_top() {
                Ok(card) => hand.push(card),
                Err(e) => return self.fatal(e, Phase::Idle),
            }
        }
        self.state.credits -= self.state.bet;
        self.state.hand = hand;
        info!(
            round = self.state.round,
            bet = self.state.bet,
            credits = self.state.credits,
            hand = %format_cards(&self.state.hand),
            "hand dealt"
        );
        self.transition(Phase::Holding);
        Ok(())
    }

    /// Flips the hold flag on one card and reports whether it is now held.
    pub fn toggle_hold(&mut self, position: usize) -> Result<bool, GameError> {
        self.require(Phase::Holding, "hold cards")?;
        if position >= HAND_SIZE {
            return self.reject(GameError::InvalidHoldPosition { position });
        }
        let held = self.state.holds.toggle(position);
        self.state.error = None;
        debug!(position, held, "hold toggled");
        if let Some(feedback) = self.feedback.as_mut() {
            feedback.hold_toggled(position, held);
        }
        Ok(held)
    }

    /// Replaces every unheld card from the deck, then evaluates and pays
    /// the hand.
    pub fn draw(&mut self) -> Result<(), GameError> {
        self.require(Phase::Holding, "draw")?;
        let needed = HAND_SIZE - self.state.holds.count();
        if self.deck.remaining() < needed {
            return self.fatal(GameError::EmptyDeck, Phase::Holding);
        }

        self.transition(Phase::Drawing);
        for position in 0..HAND_SIZE {
            if !self.state.holds.is_held(position) {
                self.state.hand[position] = self.deck.draw_top()?;
            }
        }
        debug!(
            held = self.state.holds.count(),
            hand = %format_cards(&self.state.hand),
            "cards drawn"
        );

        self.transition(Phase::Evaluating);
        self.settle();
        Ok(())
    }

    /// Leaves the result screen and readies a new deck for the next round.
    pub fn proceed_after_result(&mut self) -> Result<(), GameError> {
        self.require(Phase::ResultShown, "continue")?;
        self.state.clear_round();
        self.deck = self.decks.next_deck();
        self.transition(Phase::Idle);
        Ok(())
    }

    /// Restores the starting bankroll and forgets the previous session.
    pub fn start_new_session(&mut self) -> Result<(), GameError> {
        self.require(Phase::GameOver, "start a new session")?;
        self.state.credits = self.config.starting_credits;
        self.state.bet = MIN_BET;
        self.state.round = 1;
        self.state.history.reset();
        self.state.clear_round();
        self.deck = self.decks.next_deck();
        info!(credits = self.state.credits, "new session started");
        self.transition(Phase::Idle);
        Ok(())
    }

    fn settle(&mut self) {
        let result = evaluate(&self.state.hand);
        let bet = self.state.bet;
        let payout = result.payout(bet);
        self.state.credits = self.state.credits.saturating_add(payout);
        self.state.last_result = Some(result);

        let record = RoundResult {
            round: self.state.round,
            hand: self.state.hand.clone(),
            category: result.category,
            bet,
            payout,
            credits_after: self.state.credits,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        info!(
            round = record.round,
            category = %record.category,
            bet,
            payout,
            credits = self.state.credits,
            "round settled"
        );
        for sink in self.sinks.iter_mut() {
            sink.round_completed(&record);
        }
        self.state.history.push(record);

        let round = self.state.round;
        if self.config.max_rounds.is_some_and(|max| round >= max) {
            self.transition(Phase::GameOver);
            self.finish_session();
        } else {
            self.state.round += 1;
            self.transition(Phase::ResultShown);
        }
    }

    fn finish_session(&mut self) {
        let summary = self.summary();
        info!(
            rounds = summary.rounds_played,
            net = summary.net,
            credits = summary.final_credits,
            "session over"
        );
        for sink in self.sinks.iter_mut() {
            sink.session_completed(&summary);
        }
    }

    fn require(&mut self, phase: Phase, operation: &'static str) -> Result<(), GameError> {
        if self.state.phase == phase {
            return Ok(());
        }
        let current = self.state.phase;
        self.reject(GameError::InvalidStateTransition {
            operation,
            phase: current,
        })
    }

    fn reject<T>(&mut self, err: GameError) -> Result<T, GameError> {
        warn!(phase = %self.state.phase, error = %err, "command rejected");
        self.state.error = Some(err.to_string());
        Err(err)
    }

    /// Broken invariants are logged but not shown to the player.
    fn fatal<T>(&mut self, err: GameError, resume: Phase) -> Result<T, GameError> {
        error!(
            phase = %self.state.phase,
            remaining = self.deck.remaining(),
            error = %err,
            "engine invariant violated"
        );
        self.state.phase = resume;
        Err(err)
    }

    fn transition(&mut self, to: Phase) {
        debug!(from = %self.state.phase, %to, "phase transition");
        self.state.phase = to;
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DeckIssue;

    fn engine() -> Engine {
        Engine::new(SessionConfig::default(), Some(7))
    }

    #[test]
    fn out_of_range_bet_blocks_deal_without_debit() {
        let mut e = engine();
        e.state.bet = 9;
        let err = e.deal().unwrap_err();
        assert!(matches!(err, GameError::InvalidBetRange { bet: 9, .. }));
        assert_eq!(e.state.phase, Phase::Idle);
        assert_eq!(e.state.credits, 100);
        assert!(e.state.error.is_some());
    }

    #[test]
    fn short_deck_on_draw_is_fatal_and_silent() {
        let mut e = engine();
        e.deal().unwrap();
        e.deck = Deck::from_cards(vec![]);
        let hand_before = e.state.hand.clone();
        assert_eq!(e.draw(), Err(GameError::EmptyDeck));
        assert_eq!(e.state.phase, Phase::Holding);
        assert_eq!(e.state.hand, hand_before);
        assert!(e.state.error.is_none());
    }

    #[test]
    fn all_held_draw_needs_no_cards() {
        let mut e = engine();
        e.deal().unwrap();
        for i in 0..HAND_SIZE {
            e.toggle_hold(i).unwrap();
        }
        e.deck = Deck::from_cards(vec![]);
        let dealt = e.state.hand.clone();
        e.draw().unwrap();
        assert_eq!(e.state.history.last().unwrap().hand, dealt);
    }

    #[test]
    fn rejection_clears_on_next_success() {
        let mut e = engine();
        assert!(e.draw().is_err());
        assert_eq!(e.state.error.as_deref(), Some("Cannot draw while idle"));
        e.adjust_bet(1).unwrap();
        assert!(e.state.error.is_none());
    }

    #[test]
    fn deal_uses_deck_from_source() {
        struct Canonical;
        impl DeckSource for Canonical {
            fn next_deck(&mut self) -> Deck {
                Deck::fresh()
            }
        }
        let mut e = Engine::with_deck_source(SessionConfig::default(), Box::new(Canonical));
        assert_eq!(
            e.deal(),
            Err(GameError::DeckIntegrity(DeckIssue::Unshuffled))
        );
        assert_eq!(e.state.credits, 100);
    }
}
