//! Input parsing for the interactive table and the `eval` command.
//!
//! Parsers return structured results (`ParseResult`, `Result<_, String>`)
//! whose messages can be shown to the player verbatim.

use std::collections::HashSet;

use drawpoker_engine::cards::{Card, Rank, Suit};
use drawpoker_engine::rules::HAND_SIZE;

/// One player command at the interactive table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Deal,
    Draw,
    /// Zero-based positions to toggle
    Hold(Vec<usize>),
    Bet(i64),
    BetUp,
    BetDown,
    Next,
    NewSession,
    Help,
}

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered quit command (q or quit)
    Quit,
    Invalid(String),
}

/// Parses a line typed at the table (case-insensitive).
///
/// Hold positions are entered 1-based, either after `hold`/`h` or as bare
/// numbers.
///
/// ```rust
/// # use drawpoker_cli::validation::{parse_command, ParseResult, PlayCommand};
/// assert_eq!(parse_command("d"), ParseResult::Command(PlayCommand::Deal));
/// assert_eq!(
///     parse_command("hold 1 3"),
///     ParseResult::Command(PlayCommand::Hold(vec![0, 2]))
/// );
/// assert_eq!(parse_command("2 5"), ParseResult::Command(PlayCommand::Hold(vec![1, 4])));
/// assert_eq!(parse_command("bet 4"), ParseResult::Command(PlayCommand::Bet(4)));
/// assert_eq!(parse_command("quit"), ParseResult::Quit);
/// ```
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    let command = match head {
        "q" | "quit" | "exit" => return ParseResult::Quit,
        "deal" | "d" => PlayCommand::Deal,
        "draw" | "r" => PlayCommand::Draw,
        "next" | "n" => PlayCommand::Next,
        "new" => PlayCommand::NewSession,
        "help" | "?" => PlayCommand::Help,
        "+" => PlayCommand::BetUp,
        "-" => PlayCommand::BetDown,
        "bet" | "b" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid("Bet requires an amount (e.g., 'bet 3')".to_string());
            };
            match amount.parse::<i64>() {
                Ok(v) => PlayCommand::Bet(v),
                Err(_) => return ParseResult::Invalid("Invalid bet amount".to_string()),
            }
        }
        "hold" | "h" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Hold requires positions (e.g., 'hold 1 3')".to_string(),
                );
            }
            match parse_positions(&parts[1..]) {
                Ok(p) => PlayCommand::Hold(p),
                Err(msg) => return ParseResult::Invalid(msg),
            }
        }
        _ if head.chars().all(|c| c.is_ascii_digit()) => match parse_positions(&parts) {
            Ok(p) => PlayCommand::Hold(p),
            Err(msg) => return ParseResult::Invalid(msg),
        },
        other => {
            return ParseResult::Invalid(format!(
                "Unrecognized command: '{}'. Type 'help' for commands",
                other
            ));
        }
    };
    ParseResult::Command(command)
}

fn parse_positions(parts: &[&str]) -> Result<Vec<usize>, String> {
    parts
        .iter()
        .map(|p| match p.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("Invalid card position: {}", p)),
        })
        .collect()
}

/// Parses a card such as `AH`, `10d`, `Ts` or `Q♣`.
pub fn parse_card(text: &str) -> Result<Card, String> {
    let text = text.trim();
    let Some(suit_char) = text.chars().last() else {
        return Err("Empty card".to_string());
    };
    let rank_text = &text[..text.len() - suit_char.len_utf8()];

    let suit = match suit_char.to_ascii_uppercase() {
        'H' | '♥' => Suit::Hearts,
        'D' | '♦' => Suit::Diamonds,
        'C' | '♣' => Suit::Clubs,
        'S' | '♠' => Suit::Spades,
        _ => return Err(format!("Invalid suit in card: {}", text)),
    };
    let rank = match rank_text.to_ascii_uppercase().as_str() {
        "A" => Rank::Ace,
        "K" => Rank::King,
        "Q" => Rank::Queen,
        "J" => Rank::Jack,
        "T" | "10" => Rank::Ten,
        digit => digit
            .parse::<u8>()
            .ok()
            .filter(|v| (2..=9).contains(v))
            .and_then(Rank::from_value)
            .ok_or_else(|| format!("Invalid rank in card: {}", text))?,
    };
    Ok(Card::new(rank, suit))
}

/// Parses exactly five distinct cards separated by spaces or commas.
pub fn parse_hand(text: &str) -> Result<Vec<Card>, String> {
    let cards = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_card)
        .collect::<Result<Vec<_>, _>>()?;
    if cards.len() != HAND_SIZE {
        return Err(format!(
            "A hand needs exactly {} cards, got {}",
            HAND_SIZE,
            cards.len()
        ));
    }
    let mut seen = HashSet::new();
    for c in &cards {
        if !seen.insert(*c) {
            return Err(format!("Duplicate card: {}", c));
        }
    }
    Ok(cards)
}
