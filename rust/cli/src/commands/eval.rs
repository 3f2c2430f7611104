//! Evaluates a hand typed on the command line, e.g. `AH KH QH JH TH`.

use std::io::Write;

use drawpoker_engine::hand::evaluate;
use drawpoker_engine::rules::validate_bet;

use crate::error::CliError;
use crate::formatters::{format_hand, format_payout};
use crate::ui;
use crate::validation::parse_hand;

pub fn handle_eval_command(
    hand: &str,
    bet: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cards = match parse_hand(hand) {
        Ok(c) => c,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };
    let bet = match validate_bet(i64::from(bet)) {
        Ok(b) => b,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::InvalidInput(e.to_string()));
        }
    };

    let result = evaluate(&cards);
    writeln!(out, "Hand: {}", format_hand(&cards))?;
    writeln!(out, "Result: {}", format_payout(result.category, bet))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(hand: &str, bet: u32) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_eval_command(hand, bet, &mut out, &mut err);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn royal_flush_at_max_bet() {
        let (res, out, _) = eval("AH KH QH JH TH", 5);
        assert!(res.is_ok());
        assert!(out.contains("Result: Royal Flush, pays 3750"));
    }

    #[test]
    fn low_pair_does_not_pay() {
        let (res, out, _) = eval("2c 2d 7h 9s Kd", 1);
        assert!(res.is_ok());
        assert!(out.contains("Result: No Win"));
    }

    #[test]
    fn duplicate_cards_are_rejected() {
        let (res, _, err) = eval("AH AH QH JH TH", 1);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("Duplicate card"));
    }

    #[test]
    fn bet_is_range_checked() {
        let (res, _, err) = eval("AH KH QH JH TH", 0);
        assert!(res.is_err());
        assert!(err.contains("Invalid bet amount: 0, must be between 1 and 5"));
    }
}
