//! # pokerlib
//!
//! A Texas Hold'em table and betting round engine.
//!
//! A [`Table`] owns a fixed number of seats and at most one [`Round`] at a
//! time. Commands go in through [`Table::apply`] and every state change
//! comes back out as an ordered list of [`Notification`]s: broadcast events
//! for the whole table and private events (hole cards, turn prompts) for a
//! single player.
//!
//! ## Round lifecycle
//!
//! - **Preflop**: blinds are posted from the two players after the button
//!   and two hole cards are dealt to everyone
//! - **Flop/Turn/River**: community cards, one betting street each
//! - **Showdown**: hands are revealed according to the table's
//!   [`ShowdownRule`] and the pot is split tier by tier
//! - **Finished**: stacks are settled back onto the table's players
//!
//! Pot totals, side pots and live stacks are derived from an append-only
//! ledger of wagers, so they can't drift from what players actually put in.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, hand evaluation, seating, pot accounting and rounds
//! - [`table`]: configuration, the command protocol and the table controller
//!
//! The library logs through the [`log`] facade and never prints.

/// Core game logic, entities, and the round state machine.
pub mod game;
pub use game::{
    constants::{self, MAX_PLAYERS},
    entities::{self, Action, Card, Chips, Deck, Player, PlayerId, PlayerStatus},
    functional,
    policy::{ChoiceToShow, NoMuck, RevealAll, ShowdownPolicy, ShowdownRule},
    round::{Phase, Round, RoundError},
    seats::SeatError,
};

/// Table configuration, protocol and controller.
pub mod table;
pub use table::{
    ConfigError, Notification, PrivateEvent, RebuyPolicy, Table, TableConfig, TableError, TableEvent, UserCommand,
};
