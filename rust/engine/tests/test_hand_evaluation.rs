use drawpoker_engine::cards::{Card, Rank as R, Suit as S};
use drawpoker_engine::hand::{evaluate, HandCategory};

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

fn category(cards: [Card; 5]) -> HandCategory {
    evaluate(&cards).category
}

#[test]
fn royal_flush_pays_750() {
    let r = evaluate(&[
        c(R::Ten, S::Hearts),
        c(R::Jack, S::Hearts),
        c(R::Queen, S::Hearts),
        c(R::King, S::Hearts),
        c(R::Ace, S::Hearts),
    ]);
    assert_eq!(r.category, HandCategory::RoyalFlush);
    assert_eq!(r.multiplier, 750);
}

#[test]
fn card_order_does_not_matter() {
    let r = evaluate(&[
        c(R::Ace, S::Spades),
        c(R::Queen, S::Spades),
        c(R::Ten, S::Spades),
        c(R::King, S::Spades),
        c(R::Jack, S::Spades),
    ]);
    assert_eq!(r.category, HandCategory::RoyalFlush);
}

#[test]
fn wheel_is_a_straight() {
    let r = evaluate(&[
        c(R::Ace, S::Hearts),
        c(R::Two, S::Diamonds),
        c(R::Three, S::Clubs),
        c(R::Four, S::Spades),
        c(R::Five, S::Hearts),
    ]);
    assert_eq!(r.category, HandCategory::Straight);
    assert_eq!(r.multiplier, 12);
}

#[test]
fn suited_wheel_is_a_straight_flush() {
    assert_eq!(
        category([
            c(R::Ace, S::Clubs),
            c(R::Two, S::Clubs),
            c(R::Three, S::Clubs),
            c(R::Four, S::Clubs),
            c(R::Five, S::Clubs),
        ]),
        HandCategory::StraightFlush
    );
}

#[test]
fn no_wraparound_straight() {
    assert_eq!(
        category([
            c(R::Queen, S::Hearts),
            c(R::King, S::Diamonds),
            c(R::Ace, S::Clubs),
            c(R::Two, S::Spades),
            c(R::Three, S::Hearts),
        ]),
        HandCategory::NoWin
    );
}

#[test]
fn jacks_pay_but_tens_do_not() {
    let jacks = evaluate(&[
        c(R::Jack, S::Hearts),
        c(R::Jack, S::Clubs),
        c(R::Two, S::Diamonds),
        c(R::Five, S::Spades),
        c(R::Nine, S::Hearts),
    ]);
    assert_eq!(jacks.category, HandCategory::JacksOrBetter);
    assert_eq!(jacks.multiplier, 3);

    let tens = evaluate(&[
        c(R::Ten, S::Hearts),
        c(R::Ten, S::Clubs),
        c(R::Two, S::Diamonds),
        c(R::Five, S::Spades),
        c(R::Nine, S::Hearts),
    ]);
    assert_eq!(tens.category, HandCategory::NoWin);
    assert_eq!(tens.multiplier, 0);
}

#[test]
fn pair_of_aces_qualifies() {
    assert_eq!(
        category([
            c(R::Ace, S::Hearts),
            c(R::Ace, S::Spades),
            c(R::Three, S::Diamonds),
            c(R::Seven, S::Clubs),
            c(R::Nine, S::Hearts),
        ]),
        HandCategory::JacksOrBetter
    );
}

#[test]
fn made_hands_classify() {
    assert_eq!(
        category([
            c(R::Nine, S::Hearts),
            c(R::Nine, S::Clubs),
            c(R::Nine, S::Diamonds),
            c(R::Nine, S::Spades),
            c(R::Two, S::Hearts),
        ]),
        HandCategory::FourOfAKind
    );
    assert_eq!(
        category([
            c(R::Three, S::Hearts),
            c(R::Three, S::Clubs),
            c(R::Three, S::Diamonds),
            c(R::Six, S::Spades),
            c(R::Six, S::Hearts),
        ]),
        HandCategory::FullHouse
    );
    assert_eq!(
        category([
            c(R::Two, S::Diamonds),
            c(R::Seven, S::Diamonds),
            c(R::Nine, S::Diamonds),
            c(R::Jack, S::Diamonds),
            c(R::King, S::Diamonds),
        ]),
        HandCategory::Flush
    );
    assert_eq!(
        category([
            c(R::Five, S::Hearts),
            c(R::Six, S::Clubs),
            c(R::Seven, S::Diamonds),
            c(R::Eight, S::Spades),
            c(R::Nine, S::Hearts),
        ]),
        HandCategory::Straight
    );
    assert_eq!(
        category([
            c(R::Four, S::Hearts),
            c(R::Four, S::Clubs),
            c(R::Four, S::Diamonds),
            c(R::Eight, S::Spades),
            c(R::King, S::Hearts),
        ]),
        HandCategory::ThreeOfAKind
    );
    assert_eq!(
        category([
            c(R::Four, S::Hearts),
            c(R::Four, S::Clubs),
            c(R::Eight, S::Diamonds),
            c(R::Eight, S::Spades),
            c(R::King, S::Hearts),
        ]),
        HandCategory::TwoPair
    );
}

#[test]
fn nine_high_straight_flush_is_not_royal() {
    assert_eq!(
        category([
            c(R::Five, S::Spades),
            c(R::Six, S::Spades),
            c(R::Seven, S::Spades),
            c(R::Eight, S::Spades),
            c(R::Nine, S::Spades),
        ]),
        HandCategory::StraightFlush
    );
}

#[test]
fn wrong_hand_size_is_no_win() {
    let four = [
        c(R::Ace, S::Hearts),
        c(R::Ace, S::Spades),
        c(R::Ace, S::Clubs),
        c(R::Ace, S::Diamonds),
    ];
    assert_eq!(evaluate(&four).category, HandCategory::NoWin);
    assert_eq!(evaluate(&[]).multiplier, 0);
}
