use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::{DeckIssue, GameError};

const DECK_SIZE: usize = 52;

/// A stack of cards owned by the round engine. The top of the deck is the
/// end of the underlying vector.
///
/// # Examples
///
/// ```
/// use drawpoker_engine::deck::Deck;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let mut deck = Deck::fresh();
/// deck.shuffle(&mut rng);
/// assert!(deck.is_valid());
///
/// let top = deck.draw_top().unwrap();
/// assert_eq!(deck.remaining(), 51);
/// assert!(!deck.cards().contains(&top));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The full 52-card universe in canonical order.
    pub fn fresh() -> Self {
        Self { cards: full_deck() }
    }

    /// Builds a deck from an arbitrary card sequence. No validation is done
    /// here; see [`Deck::validate`].
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// A complete deck arranged so the given cards are drawn first, in
    /// order. The remaining cards follow in canonical order beneath them.
    pub fn stacked(top: &[Card]) -> Self {
        let mut cards: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !top.contains(c))
            .collect();
        cards.extend(top.iter().rev());
        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw_top(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Checks the deck is a complete, duplicate-free universe that is not
    /// left in canonical order. Rank and suit domains are enforced by their
    /// types, so only size, uniqueness and order need checking.
    pub fn validate(&self) -> Result<(), DeckIssue> {
        if self.cards.len() != DECK_SIZE {
            return Err(DeckIssue::WrongSize(self.cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for &c in &self.cards {
            if !seen.insert(c) {
                return Err(DeckIssue::Duplicate(c));
            }
        }
        if self.cards == full_deck() {
            return Err(DeckIssue::Unshuffled);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Supplies the deck used for each round.
pub trait DeckSource: Send {
    fn next_deck(&mut self) -> Deck;
}

/// Default deck source: a fresh universe shuffled with ChaCha20, seedable
/// for reproducible sessions.
#[derive(Debug)]
pub struct SeededShuffle {
    rng: ChaCha20Rng,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl DeckSource for SeededShuffle {
    fn next_deck(&mut self) -> Deck {
        let mut deck = Deck::fresh();
        deck.shuffle(&mut self.rng);
        deck
    }
}
