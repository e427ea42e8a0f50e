/// Property-based tests for hand evaluation using proptest
///
/// These tests check the evaluator's ordering guarantees across randomly
/// generated card combinations.
use pokerlib::game::{
    entities::{Card, HandStrength, Rank, Suit},
    functional::{HandError, argmax, eval, rank},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn suit_from(idx: u8) -> Suit {
    Suit::ALL[usize::from(idx % 4)]
}

// Strategy to generate a valid card (deuce = 2 ... ace = 14)
fn card_strategy() -> impl Strategy<Value = Card> {
    (2u8..=14, 0u8..=3).prop_map(|(value, suit_idx)| Card(value, suit_from(suit_idx)))
}

// Strategy to generate a vec of unique cards (no duplicates)
fn unique_cards_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), min..=max).prop_filter("Cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

fn five_card_hand_strategy() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_strategy(5, 5)
}

// 2 hole cards + 5 board cards
fn seven_card_hand_strategy() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_strategy(7, 7)
}

fn other_suit(suit: Suit) -> Suit {
    match suit {
        Suit::Club => Suit::Diamond,
        _ => Suit::Club,
    }
}

proptest! {
    #[test]
    fn test_rank_accepts_five_to_seven(cards in unique_cards_strategy(5, 7)) {
        prop_assert!(rank(&cards).is_ok());
    }

    #[test]
    fn test_rank_rejects_short_hands(cards in unique_cards_strategy(0, 4)) {
        prop_assert_eq!(rank(&cards), Err(HandError::InvalidHandSize(cards.len())));
    }

    #[test]
    fn test_tie_break_values_bounded(cards in seven_card_hand_strategy()) {
        let hand = eval(&cards);
        prop_assert!(!hand.values.is_empty());
        prop_assert!(hand.values.len() <= 5, "at most five tie-break values");
        prop_assert!(hand.values.iter().all(|v| (2..=14).contains(v)));
    }

    #[test]
    fn test_eval_deterministic(cards in seven_card_hand_strategy()) {
        prop_assert_eq!(eval(&cards), eval(&cards));
    }

    #[test]
    fn test_order_independent(cards in seven_card_hand_strategy()) {
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(eval(&cards), eval(&reversed));
    }

    #[test]
    fn test_argmax_single_hand_returns_zero(cards in five_card_hand_strategy()) {
        prop_assert_eq!(argmax(&[eval(&cards)]), vec![0]);
    }

    #[test]
    fn test_argmax_identical_hands_all_win(cards in five_card_hand_strategy()) {
        let hand = eval(&cards);
        prop_assert_eq!(argmax(&[hand.clone(), hand.clone(), hand]), vec![0, 1, 2]);
    }

    #[test]
    fn test_argmax_returns_valid_indices(
        hands in prop::collection::vec(five_card_hand_strategy(), 2..=10)
    ) {
        let evaluated: Vec<HandStrength> = hands.iter().map(|h| eval(h)).collect();
        let winners = argmax(&evaluated);
        prop_assert!(!winners.is_empty());

        let best = evaluated.iter().max().unwrap();
        for (idx, hand) in evaluated.iter().enumerate() {
            prop_assert_eq!(winners.contains(&idx), hand == best);
        }

        let mut sorted_winners = winners.clone();
        sorted_winners.sort_unstable();
        sorted_winners.dedup();
        prop_assert_eq!(winners, sorted_winners, "Winners should be sorted and unique");
    }

    #[test]
    fn test_more_cards_never_worse(cards in seven_card_hand_strategy()) {
        let five = eval(&cards[..5]);
        let six = eval(&cards[..6]);
        let seven = eval(&cards);
        prop_assert!(six >= five);
        prop_assert!(seven >= six);
    }

    #[test]
    fn test_hand_comparison_transitive(
        a in five_card_hand_strategy(),
        b in five_card_hand_strategy(),
        c in five_card_hand_strategy(),
    ) {
        let (a, b, c) = (eval(&a), eval(&b), eval(&c));
        if a >= b && b >= c {
            prop_assert!(a >= c);
        }
    }
}

// Specific orderings between categories

proptest! {
    #[test]
    fn test_royal_flush_beats_all(suit_idx in 0u8..=3, other in seven_card_hand_strategy()) {
        let suit = suit_from(suit_idx);
        let royal: Vec<Card> = (10..=14).map(|v| Card(v, suit)).collect();
        let royal = eval(&royal);
        prop_assert_eq!(royal.rank, Rank::StraightFlush);
        prop_assert!(royal >= eval(&other));
    }

    #[test]
    fn test_straight_flush_beats_four_kind(suit_idx in 0u8..=3, quad_value in 2u8..=14) {
        let suit = suit_from(suit_idx);
        let straight_flush: Vec<Card> = (5..=9).map(|v| Card(v, suit)).collect();
        let mut quads: Vec<Card> = Suit::ALL.iter().map(|s| Card(quad_value, *s)).collect();
        let kicker = if quad_value == 14 { 13 } else { 14 };
        quads.push(Card(kicker, suit));
        let straight_flush = eval(&straight_flush);
        let quads = eval(&quads);
        prop_assert_eq!(quads.rank, Rank::FourOfAKind);
        prop_assert!(straight_flush > quads);
    }

    #[test]
    fn test_four_kind_beats_full_house(quad_value in 2u8..=14, trip_value in 2u8..=14, pair_value in 2u8..=14) {
        prop_assume!(quad_value != trip_value && trip_value != pair_value && quad_value != pair_value);
        let mut quads: Vec<Card> = Suit::ALL.iter().map(|s| Card(quad_value, *s)).collect();
        quads.push(Card(pair_value, Suit::Club));
        let full_house = vec![
            Card(trip_value, Suit::Club),
            Card(trip_value, Suit::Spade),
            Card(trip_value, Suit::Heart),
            Card(pair_value, Suit::Diamond),
            Card(pair_value, Suit::Heart),
        ];
        let full_house = eval(&full_house);
        prop_assert_eq!(full_house.rank, Rank::FullHouse);
        prop_assert!(eval(&quads) > full_house);
    }

    #[test]
    fn test_flush_beats_straight(suit_idx in 0u8..=3, low in 2u8..=10) {
        let suit = suit_from(suit_idx);
        let flush = vec![
            Card(2, suit),
            Card(4, suit),
            Card(6, suit),
            Card(8, suit),
            Card(11, suit),
        ];
        let mut straight: Vec<Card> = (low..low + 5).map(|v| Card(v, suit)).collect();
        straight[0].1 = other_suit(suit);
        let straight = eval(&straight);
        prop_assert_eq!(straight.rank, Rank::Straight);
        prop_assert!(eval(&flush) > straight);
    }

    #[test]
    fn test_three_kind_beats_two_pair(trip_value in 2u8..=14, pair1 in 2u8..=14, pair2 in 2u8..=14) {
        prop_assume!(trip_value != pair1 && trip_value != pair2 && pair1 != pair2);
        let kicker = (2u8..=14).find(|v| ![trip_value, pair1, pair2].contains(v)).unwrap();
        let trips = vec![
            Card(trip_value, Suit::Club),
            Card(trip_value, Suit::Spade),
            Card(trip_value, Suit::Heart),
            Card(pair1, Suit::Diamond),
            Card(pair2, Suit::Diamond),
        ];
        let two_pair = vec![
            Card(pair1, Suit::Club),
            Card(pair1, Suit::Spade),
            Card(pair2, Suit::Club),
            Card(pair2, Suit::Spade),
            Card(kicker, Suit::Heart),
        ];
        prop_assert!(eval(&trips) > eval(&two_pair));
    }

    #[test]
    fn test_pair_kicker_ordering(pair in 2u8..=14, k1 in 2u8..=14, k2 in 2u8..=14) {
        prop_assume!(k1 != pair && k2 != pair && k1 != k2);
        let fillers: Vec<u8> = (2u8..=14).filter(|v| ![pair, k1, k2].contains(v)).take(2).collect();
        // Fillers may pair up with nothing, but a straight is impossible
        // with a pair in the hand.
        let hand = |kicker: u8| {
            eval(&[
                Card(pair, Suit::Club),
                Card(pair, Suit::Spade),
                Card(kicker, Suit::Heart),
                Card(fillers[0], Suit::Diamond),
                Card(fillers[1], Suit::Heart),
            ])
        };
        prop_assert_eq!(hand(k1) > hand(k2), k1 > k2);
    }
}

#[test]
fn test_wheel_below_six_high() {
    let wheel = [
        Card(14, Suit::Club),
        Card(2, Suit::Spade),
        Card(3, Suit::Heart),
        Card(4, Suit::Diamond),
        Card(5, Suit::Club),
    ];
    let six_high = [
        Card(6, Suit::Club),
        Card(2, Suit::Spade),
        Card(3, Suit::Heart),
        Card(4, Suit::Diamond),
        Card(5, Suit::Club),
    ];
    assert!(eval(&six_high) > eval(&wheel));
    assert_eq!(eval(&wheel).rank, Rank::Straight);
}

#[test]
fn test_duplicate_rejected() {
    let cards = [
        Card(14, Suit::Club),
        Card(14, Suit::Club),
        Card(3, Suit::Heart),
        Card(4, Suit::Diamond),
        Card(5, Suit::Club),
    ];
    assert_eq!(rank(&cards), Err(HandError::DuplicateCard(Card(14, Suit::Club))));
}
