//! # drawpoker-engine: Jacks-or-Better Video Poker Core
//!
//! A single-player five-card-draw engine. One round runs bet, deal, hold,
//! draw and payout against a fixed pay table; rounds accumulate into a
//! session that ends when the round limit is reached or the bankroll can
//! no longer cover the bet. Decks are shuffled with a seedable ChaCha20
//! RNG so whole sessions replay exactly.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the canonical deck
//! - [`deck`] - Deck integrity checks and seeded shuffling
//! - [`hand`] - Five-card classification and the pay table
//! - [`rules`] - Bet limits and bankroll checks
//! - [`game`] - Round phases, the hold mask and observable round state
//! - [`engine`] - The round state machine
//! - [`session`] - Session config, round history and summaries
//! - [`events`] - Feedback and round sink traits
//! - [`logger`] - JSONL round log
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_engine::cards::{Card, Rank, Suit};
//! use drawpoker_engine::hand::{evaluate, HandCategory};
//!
//! let royal = [
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ];
//! let result = evaluate(&royal);
//! assert_eq!(result.category, HandCategory::RoyalFlush);
//! assert_eq!(result.payout(5), 3750);
//! ```
//!
//! ## Playing a Round
//!
//! ```rust
//! use drawpoker_engine::engine::Engine;
//! use drawpoker_engine::game::Phase;
//! use drawpoker_engine::session::SessionConfig;
//!
//! let mut engine = Engine::new(SessionConfig::default(), Some(42));
//! engine.deal().unwrap();
//! engine.toggle_hold(2).unwrap();
//! engine.draw().unwrap();
//! assert_eq!(engine.phase(), Phase::ResultShown);
//! engine.proceed_after_result().unwrap();
//! assert_eq!(engine.phase(), Phase::Idle);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod rules;
pub mod session;
