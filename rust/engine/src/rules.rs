use crate::errors::GameError;

/// Smallest bet accepted for a round.
pub const MIN_BET: u32 = 1;
/// Largest bet accepted for a round.
pub const MAX_BET: u32 = 5;

/// Number of cards dealt into a hand.
pub const HAND_SIZE: usize = 5;

/// Validates an explicit bet amount against the table limits.
///
/// # Errors
///
/// Returns [`GameError::InvalidBetRange`] when `bet` is outside
/// [`MIN_BET`]..=[`MAX_BET`].
///
/// # Examples
///
/// ```
/// use drawpoker_engine::rules::validate_bet;
/// use drawpoker_engine::errors::GameError;
///
/// assert_eq!(validate_bet(3), Ok(3));
/// assert!(matches!(validate_bet(0), Err(GameError::InvalidBetRange { .. })));
/// assert!(matches!(validate_bet(6), Err(GameError::InvalidBetRange { .. })));
/// ```
pub fn validate_bet(bet: i64) -> Result<u32, GameError> {
    if (MIN_BET as i64..=MAX_BET as i64).contains(&bet) {
        Ok(bet as u32)
    } else {
        Err(GameError::InvalidBetRange {
            bet,
            min: MIN_BET,
            max: MAX_BET,
        })
    }
}

/// Applies a relative change to a bet, pinning the result to the limits.
///
/// ```
/// use drawpoker_engine::rules::adjusted_bet;
///
/// assert_eq!(adjusted_bet(3, 1), 4);
/// assert_eq!(adjusted_bet(5, 1), 5);
/// assert_eq!(adjusted_bet(1, -3), 1);
/// ```
pub fn adjusted_bet(current: u32, delta: i32) -> u32 {
    let target = i64::from(current) + i64::from(delta);
    target.clamp(i64::from(MIN_BET), i64::from(MAX_BET)) as u32
}

/// Checks that the bankroll covers the bet.
///
/// # Errors
///
/// Returns [`GameError::InsufficientCredits`] when `bet > credits`.
pub fn check_affordable(credits: u32, bet: u32) -> Result<(), GameError> {
    if credits >= bet {
        Ok(())
    } else {
        Err(GameError::InsufficientCredits { credits, bet })
    }
}
