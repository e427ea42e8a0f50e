use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{
    constants::MAX_PLAYERS,
    entities::{Chips, PlayerId, SeatIndex},
    round::RoundError,
    seats::SeatError,
};

/// Problems with a table's configuration. A table can't be built with any
/// of these.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ConfigError {
    #[error("seat count must be between 1 and {MAX_PLAYERS}, got {0}")]
    InvalidSeatCount(usize),
    #[error("blinds must be positive")]
    InvalidBlind,
    #[error("big blind {big} is less than small blind {small}")]
    BlindsOutOfOrder { small: Chips, big: Chips },
    #[error("button seat {0} doesn't exist")]
    InvalidButton(SeatIndex),
    #[error("expected {expected} seats, got {actual}")]
    SeatCountMismatch { expected: usize, actual: usize },
    #[error("player {0} is seated more than once")]
    DuplicatePlayer(PlayerId),
    #[error("stacks add up to more than {} chips", Chips::MAX)]
    TooManyChips,
}

/// Why a table command was refused. The table is left as it was.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum TableError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seat(#[from] SeatError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error("need 2+ players with chips")]
    InsufficientPlayers,
    #[error("no round in progress")]
    NoActiveRound,
    #[error("round in progress")]
    RoundInProgress,
    /// Zero, or more than the table can hold.
    #[error("invalid amount")]
    InvalidAmount,
}
