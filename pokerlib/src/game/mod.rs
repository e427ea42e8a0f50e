//! Poker engine: cards, hand evaluation, seating, pot accounting and the
//! betting round state machine.

pub mod constants;
pub mod entities;
pub mod functional;
pub mod policy;
pub mod pot;
pub mod round;
pub mod seats;
