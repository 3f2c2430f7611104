//! Built-in hold strategy used by `play --auto` and `sim`.
//!
//! A simplified Jacks-or-Better strategy, checked in order:
//!
//! 1. Any paying straight or better: keep everything
//! 2. Four to a royal flush
//! 3. Three of a kind, two pair or a high pair: keep the matched cards
//! 4. Four to a flush
//! 5. A low pair
//! 6. Four to an open-ended straight
//! 7. Up to two high cards (Jack or better)
//! 8. Otherwise draw five new cards
//!
//! The strategy is deterministic so seeded simulations replay exactly.

use drawpoker_engine::cards::{Card, Rank, Suit, all_suits};
use drawpoker_engine::engine::Engine;
use drawpoker_engine::errors::GameError;
use drawpoker_engine::game::HoldMask;
use drawpoker_engine::hand::{HandCategory, evaluate};
use drawpoker_engine::rules::HAND_SIZE;

pub fn choose_holds(hand: &[Card]) -> HoldMask {
    if hand.len() != HAND_SIZE {
        return HoldMask::none();
    }
    let category = evaluate(hand).category;
    if category.priority() <= HandCategory::Straight.priority() {
        return (0..HAND_SIZE).collect();
    }
    if let Some(mask) = four_of_suit(hand, |c| c.rank >= Rank::Ten) {
        return mask;
    }

    let counts = rank_counts(hand);
    let matched: HoldMask = (0..HAND_SIZE)
        .filter(|&i| counts[hand[i].rank.value() as usize] >= 2)
        .collect();
    if matches!(
        category,
        HandCategory::ThreeOfAKind | HandCategory::TwoPair | HandCategory::JacksOrBetter
    ) {
        return matched;
    }
    if let Some(mask) = four_of_suit(hand, |_| true) {
        return mask;
    }
    if matched.count() == 2 {
        return matched;
    }
    if let Some(mask) = open_ended_draw(hand) {
        return mask;
    }
    high_cards(hand)
}

/// Plays one round from `Idle` with the built-in strategy: deal, hold,
/// draw. Returns the holds that were used.
pub fn play_round(engine: &mut Engine) -> Result<HoldMask, GameError> {
    engine.deal()?;
    let holds = choose_holds(&engine.state().hand);
    for position in holds.positions() {
        engine.toggle_hold(position)?;
    }
    engine.draw()?;
    Ok(holds)
}

fn rank_counts(hand: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in hand {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

/// Four cards of one suit that also satisfy `keep`.
fn four_of_suit(hand: &[Card], keep: impl Fn(&Card) -> bool) -> Option<HoldMask> {
    all_suits().into_iter().find_map(|suit: Suit| {
        let mask: HoldMask = (0..HAND_SIZE)
            .filter(|&i| hand[i].suit == suit && keep(&hand[i]))
            .collect();
        (mask.count() == 4).then_some(mask)
    })
}

/// Four consecutive ranks that can be completed at either end, so the
/// highest card is at most a King and the lowest at least a Two.
fn open_ended_draw(hand: &[Card]) -> Option<HoldMask> {
    let counts = rank_counts(hand);
    (2u8..=10).rev().find_map(|low| {
        if !(low..low + 4).all(|v| counts[v as usize] > 0) {
            return None;
        }
        let mut mask = HoldMask::none();
        for v in low..low + 4 {
            if let Some(i) = hand.iter().position(|c| c.rank.value() == v) {
                mask.toggle(i);
            }
        }
        Some(mask)
    })
}

fn high_cards(hand: &[Card]) -> HoldMask {
    let mut high: Vec<usize> = (0..HAND_SIZE)
        .filter(|&i| hand[i].rank >= Rank::Jack)
        .collect();
    high.sort_by(|&a, &b| hand[b].rank.cmp(&hand[a].rank));
    high.into_iter().take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpoker_engine::cards::{Rank as R, Suit as S};

    fn hand(cards: [(R, S); 5]) -> Vec<Card> {
        cards.iter().map(|&(r, s)| Card::new(r, s)).collect()
    }

    fn held(cards: [(R, S); 5]) -> Vec<usize> {
        choose_holds(&hand(cards)).positions().collect()
    }

    #[test]
    fn keeps_made_straight() {
        let h = [
            (R::Five, S::Hearts),
            (R::Six, S::Clubs),
            (R::Seven, S::Diamonds),
            (R::Eight, S::Spades),
            (R::Nine, S::Hearts),
        ];
        assert_eq!(held(h), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn breaks_high_pair_for_four_to_royal() {
        let h = [
            (R::King, S::Spades),
            (R::Queen, S::Spades),
            (R::Jack, S::Spades),
            (R::Ten, S::Spades),
            (R::King, S::Hearts),
        ];
        assert_eq!(held(h), vec![0, 1, 2, 3]);
    }

    #[test]
    fn keeps_both_pairs() {
        let h = [
            (R::Four, S::Spades),
            (R::Nine, S::Clubs),
            (R::Four, S::Hearts),
            (R::King, S::Diamonds),
            (R::Nine, S::Hearts),
        ];
        assert_eq!(held(h), vec![0, 1, 2, 4]);
    }

    #[test]
    fn flush_draw_beats_low_pair() {
        let h = [
            (R::Two, S::Clubs),
            (R::Two, S::Hearts),
            (R::Seven, S::Clubs),
            (R::Nine, S::Clubs),
            (R::King, S::Clubs),
        ];
        assert_eq!(held(h), vec![0, 2, 3, 4]);
    }

    #[test]
    fn low_pair_beats_straight_draw() {
        let h = [
            (R::Five, S::Clubs),
            (R::Six, S::Hearts),
            (R::Seven, S::Diamonds),
            (R::Eight, S::Clubs),
            (R::Eight, S::Spades),
        ];
        assert_eq!(held(h), vec![3, 4]);
    }

    #[test]
    fn open_ended_straight_draw() {
        let h = [
            (R::Five, S::Clubs),
            (R::Six, S::Hearts),
            (R::Seven, S::Diamonds),
            (R::Eight, S::Clubs),
            (R::King, S::Spades),
        ];
        assert_eq!(held(h), vec![0, 1, 2, 3]);
    }

    #[test]
    fn two_highest_high_cards() {
        let h = [
            (R::Jack, S::Clubs),
            (R::Ace, S::Hearts),
            (R::Three, S::Diamonds),
            (R::Queen, S::Clubs),
            (R::Seven, S::Spades),
        ];
        assert_eq!(held(h), vec![1, 3]);
    }

    #[test]
    fn garbage_is_discarded() {
        let h = [
            (R::Two, S::Clubs),
            (R::Four, S::Hearts),
            (R::Seven, S::Diamonds),
            (R::Nine, S::Clubs),
            (R::Ten, S::Spades),
        ];
        assert!(held(h).is_empty());
    }

    #[test]
    fn play_round_settles_from_idle() {
        use drawpoker_engine::game::Phase;
        use drawpoker_engine::session::SessionConfig;

        let mut eng = Engine::new(SessionConfig::default(), Some(5));
        let holds = play_round(&mut eng).unwrap();
        assert_eq!(eng.phase(), Phase::ResultShown);
        assert_eq!(eng.state().holds, holds);
        assert_eq!(eng.state().history.len(), 1);
    }
}
