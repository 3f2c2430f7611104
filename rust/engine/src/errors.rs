use thiserror::Error;

use crate::cards::Card;
use crate::game::Phase;

/// Reasons a deck fails its between-rounds integrity check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckIssue {
    #[error("Invalid deck size: {0}")]
    WrongSize(usize),
    #[error("Duplicate card in deck: {0}")]
    Duplicate(Card),
    #[error("Deck is not shuffled")]
    Unshuffled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot {operation} while {phase}")]
    InvalidStateTransition {
        operation: &'static str,
        phase: Phase,
    },
    #[error("Insufficient credits: {credits} available, bet is {bet}")]
    InsufficientCredits { credits: u32, bet: u32 },
    #[error("Invalid bet amount: {bet}, must be between {min} and {max}")]
    InvalidBetRange { bet: i64, min: u32, max: u32 },
    #[error("Invalid hold position: {position}")]
    InvalidHoldPosition { position: usize },
    #[error("Deck integrity check failed: {0}")]
    DeckIntegrity(#[from] DeckIssue),
    #[error("Deck exhausted")]
    EmptyDeck,
}

impl GameError {
    /// True for errors that indicate a broken engine invariant rather than
    /// a rejected player action.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::EmptyDeck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_deck_is_fatal() {
        assert!(GameError::EmptyDeck.is_fatal());
        assert!(!GameError::InsufficientCredits { credits: 0, bet: 1 }.is_fatal());
        assert!(!GameError::DeckIntegrity(DeckIssue::Unshuffled).is_fatal());
    }

    #[test]
    fn messages_name_the_phase() {
        let err = GameError::InvalidStateTransition {
            operation: "draw",
            phase: Phase::Idle,
        };
        assert_eq!(err.to_string(), "Cannot draw while idle");
    }
}
