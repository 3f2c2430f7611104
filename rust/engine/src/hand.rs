use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Jacks-or-Better hand categories, highest paying first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    JacksOrBetter,
    NoWin,
}

impl HandCategory {
    /// Every category in evaluation priority order.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::JacksOrBetter,
        HandCategory::NoWin,
    ];

    pub const fn multiplier(self) -> u32 {
        match self {
            HandCategory::RoyalFlush => 750,
            HandCategory::StraightFlush => 150,
            HandCategory::FourOfAKind => 75,
            HandCategory::FullHouse => 27,
            HandCategory::Flush => 18,
            HandCategory::Straight => 12,
            HandCategory::ThreeOfAKind => 9,
            HandCategory::TwoPair => 6,
            HandCategory::JacksOrBetter => 3,
            HandCategory::NoWin => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "Royal Flush",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::JacksOrBetter => "Jacks or Better",
            HandCategory::NoWin => "No Win",
        }
    }

    /// Position in [`HandCategory::ALL`]; lower is better.
    pub fn priority(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed pay schedule, in evaluation priority order.
pub const PAY_TABLE: [(HandCategory, u32); 10] = [
    (HandCategory::RoyalFlush, HandCategory::RoyalFlush.multiplier()),
    (HandCategory::StraightFlush, HandCategory::StraightFlush.multiplier()),
    (HandCategory::FourOfAKind, HandCategory::FourOfAKind.multiplier()),
    (HandCategory::FullHouse, HandCategory::FullHouse.multiplier()),
    (HandCategory::Flush, HandCategory::Flush.multiplier()),
    (HandCategory::Straight, HandCategory::Straight.multiplier()),
    (HandCategory::ThreeOfAKind, HandCategory::ThreeOfAKind.multiplier()),
    (HandCategory::TwoPair, HandCategory::TwoPair.multiplier()),
    (HandCategory::JacksOrBetter, HandCategory::JacksOrBetter.multiplier()),
    (HandCategory::NoWin, HandCategory::NoWin.multiplier()),
];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub category: HandCategory,
    pub multiplier: u32,
}

impl HandResult {
    pub const NO_WIN: HandResult = HandResult::of(HandCategory::NoWin);

    pub const fn of(category: HandCategory) -> Self {
        Self {
            category,
            multiplier: category.multiplier(),
        }
    }

    /// Credits returned for a winning hand at the given bet.
    pub fn payout(&self, bet: u32) -> u32 {
        self.multiplier.saturating_mul(bet)
    }

    pub fn is_win(&self) -> bool {
        self.multiplier > 0
    }
}

/// Evaluates a video poker hand. Anything other than exactly five cards
/// scores as [`HandCategory::NoWin`].
///
/// # Examples
///
/// ```
/// use drawpoker_engine::cards::{Card, Rank, Suit};
/// use drawpoker_engine::hand::{evaluate, HandCategory};
///
/// let wheel = [
///     Card::new(Rank::Ace, Suit::Hearts),
///     Card::new(Rank::Two, Suit::Diamonds),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Spades),
///     Card::new(Rank::Five, Suit::Hearts),
/// ];
/// let result = evaluate(&wheel);
/// assert_eq!(result.category, HandCategory::Straight);
/// assert_eq!(result.multiplier, 12);
///
/// assert_eq!(evaluate(&wheel[..4]).category, HandCategory::NoWin);
/// ```
pub fn evaluate(hand: &[Card]) -> HandResult {
    match <&[Card; 5]>::try_from(hand) {
        Ok(cards) => HandResult::of(classify(cards)),
        Err(_) => HandResult::NO_WIN,
    }
}

pub fn classify(cards: &[Card; 5]) -> HandCategory {
    let mut ranks = cards.map(|c| c.rank.value());
    ranks.sort_unstable();

    let mut rank_counts = [0u8; 15]; // 2..14 used
    for &r in &ranks {
        rank_counts[r as usize] += 1;
    }
    let mut shape = [0u8; 5];
    let mut groups = 0;
    for &count in rank_counts.iter().filter(|&&c| c > 0) {
        shape[groups] = count;
        groups += 1;
    }
    let shape = &mut shape[..groups];
    shape.sort_unstable_by(|a, b| b.cmp(a));

    let flush = is_flush(cards);
    let straight = is_straight(&ranks);

    if flush && ranks == [10, 11, 12, 13, 14] {
        HandCategory::RoyalFlush
    } else if flush && straight {
        HandCategory::StraightFlush
    } else if shape == [4, 1] {
        HandCategory::FourOfAKind
    } else if shape == [3, 2] {
        HandCategory::FullHouse
    } else if flush {
        HandCategory::Flush
    } else if straight {
        HandCategory::Straight
    } else if shape == [3, 1, 1] {
        HandCategory::ThreeOfAKind
    } else if shape == [2, 2, 1] {
        HandCategory::TwoPair
    } else if shape == [2, 1, 1, 1] && pair_rank(&rank_counts) >= 11 {
        HandCategory::JacksOrBetter
    } else {
        HandCategory::NoWin
    }
}

fn is_flush(cards: &[Card; 5]) -> bool {
    cards.iter().all(|c| c.suit == cards[0].suit)
}

/// `sorted` must be ascending. The wheel (A-2-3-4-5) has to be matched
/// explicitly because the Ace sorts high.
fn is_straight(sorted: &[u8; 5]) -> bool {
    let distinct = sorted.windows(2).all(|w| w[0] != w[1]);
    distinct && (sorted[4] - sorted[0] == 4 || *sorted == [2, 3, 4, 5, 14])
}

fn pair_rank(rank_counts: &[u8; 15]) -> u8 {
    (2..=14u8)
        .find(|&r| rank_counts[r as usize] == 2)
        .unwrap_or(0)
}
