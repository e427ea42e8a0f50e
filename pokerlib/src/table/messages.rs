//! Table protocol types.
//!
//! Inbound commands and outbound notifications are plain data. A
//! [`Table`](super::Table) turns every accepted command into an ordered list
//! of [`Notification`]s, broadcast events for everyone at the table and
//! private events for a single player.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{
    entities::{Action, ActionChoices, BetAction, Card, Chips, HandStrength, PlayerId, SeatIndex, Username},
    round::Phase,
};

/// Commands a player can send to a table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum UserCommand {
    /// Take a seat with the table buy-in. Without a seat the first open
    /// one is used.
    Sit {
        name: String,
        seat: Option<SeatIndex>,
    },
    LeaveTable,
    StartRound,
    /// Add chips to the player's stack.
    Buy(Chips),
    TakeAction(Action),
}

impl fmt::Display for UserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sit { name, seat: Some(seat) } => write!(f, "sit as {name} in seat {seat}"),
            Self::Sit { name, seat: None } => write!(f, "sit as {name}"),
            Self::LeaveTable => write!(f, "leave table"),
            Self::StartRound => write!(f, "start round"),
            Self::Buy(amount) => write!(f, "buy {amount} chips"),
            Self::TakeAction(action) => write!(f, "{action}"),
        }
    }
}

/// A command tagged with the player it came from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClientMessage {
    pub player: PlayerId,
    pub command: UserCommand,
}

/// Events visible to everyone at the table.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum TableEvent {
    PlayerSeated {
        player: PlayerId,
        name: Username,
        seat: SeatIndex,
        stack: Chips,
    },
    PlayerLeft {
        player: PlayerId,
        seat: SeatIndex,
        stack: Chips,
    },
    PlayerBoughtIn {
        player: PlayerId,
        amount: Chips,
        stack: Chips,
    },
    SmallBlindPosted {
        player: PlayerId,
        amount: Chips,
    },
    BigBlindPosted {
        player: PlayerId,
        amount: Chips,
    },
    RoundStarted {
        button: PlayerId,
    },
    /// `amount` is the number of chips the action moved into the pot.
    PlayerActed {
        player: PlayerId,
        action: BetAction,
        amount: Option<Chips>,
    },
    StreetAdvanced {
        phase: Phase,
        cards: Vec<Card>,
    },
    PlayerActionRequired {
        player: PlayerId,
    },
    /// `hand` is empty when there aren't enough cards out to make one.
    HandRevealed {
        player: PlayerId,
        cards: Vec<Card>,
        hand: Option<HandStrength>,
    },
    PlayerMucked {
        player: PlayerId,
    },
    /// Tier 0 is the main pot, higher tiers are side pots.
    PotAwarded {
        tier: usize,
        amount: Chips,
        winners: Vec<PlayerId>,
    },
    RoundFinished {
        payouts: Vec<(PlayerId, Chips)>,
    },
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerSeated {
                player,
                name,
                seat,
                stack,
            } => write!(f, "{name} (#{player}) sat in seat {seat} with {stack}"),
            Self::PlayerLeft { player, seat, stack } => {
                write!(f, "#{player} left seat {seat} with {stack}")
            }
            Self::PlayerBoughtIn { player, amount, stack } => {
                write!(f, "#{player} bought {amount} ({stack} total)")
            }
            Self::SmallBlindPosted { player, amount } => {
                write!(f, "#{player} posted small blind {amount}")
            }
            Self::BigBlindPosted { player, amount } => {
                write!(f, "#{player} posted big blind {amount}")
            }
            Self::RoundStarted { button } => write!(f, "round started, #{button} has the button"),
            Self::PlayerActed {
                player,
                action,
                amount: Some(amount),
            } => write!(f, "#{player} {action} {amount}"),
            Self::PlayerActed { player, action, amount: None } => write!(f, "#{player} {action}"),
            Self::StreetAdvanced { phase, cards } => {
                let cards = cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
                write!(f, "{phase}: {cards}")
            }
            Self::PlayerActionRequired { player } => write!(f, "#{player} to act"),
            Self::HandRevealed { player, cards, hand } => {
                let cards = cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
                match hand {
                    Some(hand) => write!(f, "#{player} shows {cards} ({hand})"),
                    None => write!(f, "#{player} shows {cards}"),
                }
            }
            Self::PlayerMucked { player } => write!(f, "#{player} mucked"),
            Self::PotAwarded { tier, amount, winners } => {
                let winners = winners.iter().map(|w| format!("#{w}")).collect::<Vec<_>>().join(", ");
                write!(f, "pot {tier} ({amount}) to {winners}")
            }
            Self::RoundFinished { payouts } => {
                let payouts = payouts
                    .iter()
                    .map(|(player, amount)| format!("#{player} +{amount}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "round finished: {payouts}")
            }
        }
    }
}

/// Events only the addressed player may see.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum PrivateEvent {
    HoleCardsDealt { cards: Vec<Card> },
    TurnSignal { choices: ActionChoices },
    /// Show or muck. `must_show` is set when mucking would leave a pot
    /// without a contender.
    ShowdownChoicePrompt { must_show: bool },
}

impl fmt::Display for PrivateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HoleCardsDealt { cards } => {
                let cards = cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
                write!(f, "dealt {cards}")
            }
            Self::TurnSignal { choices } => write!(f, "your turn: {choices}"),
            Self::ShowdownChoicePrompt { must_show: true } => write!(f, "you must show"),
            Self::ShowdownChoicePrompt { must_show: false } => write!(f, "show or muck"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Notification {
    Broadcast(TableEvent),
    Private { to: PlayerId, event: PrivateEvent },
}

impl Notification {
    pub fn broadcast(&self) -> Option<&TableEvent> {
        match self {
            Self::Broadcast(event) => Some(event),
            Self::Private { .. } => None,
        }
    }

    /// Whether `player` is allowed to see this notification.
    pub fn is_visible_to(&self, player: PlayerId) -> bool {
        match self {
            Self::Broadcast(_) => true,
            Self::Private { to, .. } => *to == player,
        }
    }
}

impl From<TableEvent> for Notification {
    fn from(event: TableEvent) -> Self {
        Self::Broadcast(event)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast(event) => write!(f, "{event}"),
            Self::Private { to, event } => write!(f, "(to #{to}) {event}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit;

    #[test]
    fn test_command_json_shape() {
        let msg = ClientMessage {
            player: 3,
            command: UserCommand::TakeAction(Action::Raise { amount: 50 }),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"player":3,"command":{"TakeAction":{"Raise":{"amount":50}}}}"#);
        let parsed: ClientMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_private_visibility() {
        let private = Notification::Private {
            to: 1,
            event: PrivateEvent::HoleCardsDealt {
                cards: vec![Card(14, Suit::Spade), Card(13, Suit::Spade)],
            },
        };
        assert!(private.is_visible_to(1));
        assert!(!private.is_visible_to(2));
        assert!(private.broadcast().is_none());

        let public = Notification::from(TableEvent::PlayerActionRequired { player: 1 });
        assert!(public.is_visible_to(2));
    }

    #[test]
    fn test_event_display() {
        let event = TableEvent::PlayerActed {
            player: 2,
            action: BetAction::Call,
            amount: Some(10),
        };
        assert_eq!(event.to_string(), "#2 call 10");
        let event = TableEvent::PotAwarded {
            tier: 0,
            amount: 30,
            winners: vec![1, 2],
        };
        assert_eq!(event.to_string(), "pot 0 (30) to #1, #2");
    }
}
