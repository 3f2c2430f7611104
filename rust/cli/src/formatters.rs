//! Card, hand and pay table formatting for terminal display.
//!
//! Suits render as ♥ ♦ ♣ ♠ where the terminal supports Unicode and as
//! h d c s otherwise.
//!
//! ```rust
//! use drawpoker_engine::cards::{Card, Rank, Suit};
//! use drawpoker_cli::formatters::{format_card, format_hand};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_hand(&[ace, ace]).starts_with("A"));
//! ```

use drawpoker_engine::cards::{Card, Rank, Suit};
use drawpoker_engine::game::HoldMask;
use drawpoker_engine::hand::{HandCategory, PAY_TABLE};
use drawpoker_engine::rules::{MAX_BET, MIN_BET};

/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Unix terminals are assumed
/// to render Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Single-character rank (2-9, T, J, Q, K, A) so hands line up in columns.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ten => "T".to_string(),
        other => other.symbol().to_string(),
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

pub fn format_hand(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// Renders the hand with held cards bracketed, e.g. `[A♠]  K♦  ...`, and a
/// second line of 1-based position numbers under each card.
pub fn format_hand_with_holds(cards: &[Card], holds: &HoldMask) -> String {
    let mut top = Vec::with_capacity(cards.len());
    let mut bottom = Vec::with_capacity(cards.len());
    for (i, card) in cards.iter().enumerate() {
        if holds.is_held(i) {
            top.push(format!("[{}]", format_card(card)));
        } else {
            top.push(format!(" {} ", format_card(card)));
        }
        bottom.push(format!(" {}  ", i + 1));
    }
    format!("{}\n{}", top.join(" "), bottom.join(" ").trim_end())
}

pub fn format_payout(category: HandCategory, bet: u32) -> String {
    let payout = category.multiplier().saturating_mul(bet);
    if payout == 0 {
        format!("{}", category)
    } else {
        format!("{}, pays {}", category, payout)
    }
}

/// The pay table with one column per allowed bet. The no-win row is
/// omitted.
pub fn format_pay_table() -> String {
    let mut lines = Vec::with_capacity(PAY_TABLE.len());
    let mut header = format!("{:<16}", "Hand");
    for bet in MIN_BET..=MAX_BET {
        header.push_str(&format!("{:>6}", bet));
    }
    lines.push(header);
    for (category, multiplier) in PAY_TABLE {
        if multiplier == 0 {
            continue;
        }
        let mut row = format!("{:<16}", category.name());
        for bet in MIN_BET..=MAX_BET {
            row.push_str(&format!("{:>6}", multiplier * bet));
        }
        lines.push(row);
    }
    lines.join("\n")
}
