//! Fixed-capacity seating for a single table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Player, PlayerId, SeatIndex};

#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SeatError {
    #[error("seat {0} is occupied")]
    SeatOccupied(SeatIndex),
    #[error("table is full")]
    TableFull,
    #[error("player {0} is not seated")]
    PlayerNotSeated(PlayerId),
    #[error("player {0} is already seated")]
    AlreadySeated(PlayerId),
    #[error("seat {0} does not exist")]
    InvalidSeat(SeatIndex),
}

/// Ordered seat slots, each empty or holding exactly one player. A player
/// id appears in at most one slot.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PlayerSeats {
    seats: Vec<Option<Player>>,
}

impl PlayerSeats {
    #[must_use]
    pub fn new(num_seats: usize) -> Self {
        Self {
            seats: vec![None; num_seats],
        }
    }

    /// Seat `player` in `seat_idx`, or the first open seat when no seat is
    /// requested. Returns the seat the player ended up in.
    pub fn seat(&mut self, player: Player, seat_idx: Option<SeatIndex>) -> Result<SeatIndex, SeatError> {
        if self.contains(player.id) {
            return Err(SeatError::AlreadySeated(player.id));
        }
        let seat_idx = match seat_idx {
            Some(idx) => match self.seats.get(idx) {
                None => return Err(SeatError::InvalidSeat(idx)),
                Some(Some(_)) => return Err(SeatError::SeatOccupied(idx)),
                Some(None) => idx,
            },
            None => self
                .seats
                .iter()
                .position(Option::is_none)
                .ok_or(SeatError::TableFull)?,
        };
        self.seats[seat_idx] = Some(player);
        Ok(seat_idx)
    }

    /// Empty the player's seat, returning the seat and the player.
    pub fn unseat(&mut self, player_id: PlayerId) -> Result<(SeatIndex, Player), SeatError> {
        let seat_idx = self
            .seat_of(player_id)
            .ok_or(SeatError::PlayerNotSeated(player_id))?;
        let player = self.seats[seat_idx]
            .take()
            .ok_or(SeatError::PlayerNotSeated(player_id))?;
        Ok((seat_idx, player))
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.seat_of(player_id).is_some()
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|seat| seat.as_ref().is_some_and(|p| p.id == player_id))
    }

    pub fn get(&self, seat_idx: SeatIndex) -> Option<&Player> {
        self.seats.get(seat_idx).and_then(Option::as_ref)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.occupied().find(|(_, p)| p.id == player_id).map(|(_, p)| p)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.seats
            .iter_mut()
            .flatten()
            .find(|player| player.id == player_id)
    }

    /// Occupied seats in seat order.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &Player)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(idx, seat)| seat.as_ref().map(|player| (idx, player)))
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.seats.iter_mut().flatten()
    }

    pub fn num_occupied(&self) -> usize {
        self.occupied().count()
    }

    pub fn open_seats(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| seat.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl From<Vec<Option<Player>>> for PlayerSeats {
    fn from(seats: Vec<Option<Player>>) -> Self {
        Self { seats }
    }
}
