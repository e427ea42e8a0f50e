//! Hand evaluation. Everything in here is a pure function of its inputs.

use std::{array, collections::HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    constants::{HAND_SIZE, MAX_EVAL_CARDS},
    entities::{ACE, Card, HandStrength, Rank, Value},
};

#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum HandError {
    #[error("need {HAND_SIZE} to {MAX_EVAL_CARDS} cards, got {0}")]
    InvalidHandSize(usize),
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// Rank a set of 5 to 7 cards, picking the best five card subset.
pub fn rank(cards: &[Card]) -> Result<HandStrength, HandError> {
    if !(HAND_SIZE..=MAX_EVAL_CARDS).contains(&cards.len()) {
        return Err(HandError::InvalidHandSize(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(card) {
            return Err(HandError::DuplicateCard(*card));
        }
    }
    Ok(eval(cards))
}

/// Return the strength of the best five card hand within `cards`.
/// Callers are expected to pass at least five distinct cards; use
/// [`rank`] for unchecked input.
pub fn eval(cards: &[Card]) -> HandStrength {
    combinations(cards.len(), HAND_SIZE)
        .into_iter()
        .map(|idx| eval_five(array::from_fn(|i| cards[idx[i]])))
        .max()
        .unwrap_or(HandStrength {
            rank: Rank::HighCard,
            values: Vec::new(),
        })
}

/// Return the indices of all hands tied for the best strength, in
/// ascending order.
pub fn argmax(hands: &[HandStrength]) -> Vec<usize> {
    let Some(best) = hands.iter().max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, hand)| *hand == best)
        .map(|(idx, _)| idx)
        .collect()
}

fn eval_five(cards: [Card; HAND_SIZE]) -> HandStrength {
    let is_flush = cards.iter().all(|card| card.1 == cards[0].1);

    // Group values by count, larger groups first and higher values
    // breaking ties between groups of the same size.
    let mut counts: Vec<(usize, Value)> = Vec::with_capacity(HAND_SIZE);
    for card in cards {
        match counts.iter_mut().find(|(_, value)| *value == card.0) {
            Some((count, _)) => *count += 1,
            None => counts.push((1, card.0)),
        }
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let values: Vec<Value> = counts.iter().map(|(_, value)| *value).collect();

    let straight_high = if counts.len() == HAND_SIZE {
        if values[0] - values[4] == 4 {
            Some(values[0])
        } else if values == [ACE, 5, 4, 3, 2] {
            // The wheel plays the ace low.
            Some(5)
        } else {
            None
        }
    } else {
        None
    };

    let rank = match (straight_high, is_flush, counts[0].0, counts.get(1).map(|c| c.0)) {
        (Some(_), true, _, _) => Rank::StraightFlush,
        (_, _, 4, _) => Rank::FourOfAKind,
        (_, _, 3, Some(2)) => Rank::FullHouse,
        (_, true, _, _) => Rank::Flush,
        (Some(_), false, _, _) => Rank::Straight,
        (_, _, 3, _) => Rank::ThreeOfAKind,
        (_, _, 2, Some(2)) => Rank::TwoPair,
        (_, _, 2, _) => Rank::OnePair,
        _ => Rank::HighCard,
    };
    let values = match (rank, straight_high) {
        (Rank::StraightFlush | Rank::Straight, Some(high)) => vec![high],
        _ => values,
    };
    HandStrength { rank, values }
}

/// All `k` sized index combinations of `0..n` in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    if k > n {
        return result;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        result.push(idx.clone());
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return result;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
