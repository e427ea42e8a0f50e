//! Numeric limits shared by the table and the round.

/// A deck holds enough cards for 23 hands of two plus a five card board.
pub const MAX_PLAYERS: usize = 23;

/// Longest display name kept after sanitizing.
pub const MAX_NAME_LENGTH: usize = 16;

pub const NUM_HOLE_CARDS: usize = 2;
pub const NUM_COMMUNITY_CARDS: usize = 5;

/// Cards in a ranked poker hand.
pub const HAND_SIZE: usize = 5;
/// Most cards the evaluator accepts (two hole cards plus the board).
pub const MAX_EVAL_CARDS: usize = NUM_HOLE_CARDS + NUM_COMMUNITY_CARDS;

pub const DECK_SIZE: usize = 52;
