//! Replay scripts: a table config, the players to seat and the commands to
//! run against the table, in order.

use std::{fs::File, io::Read, path::Path};

use log::{debug, info, warn};
use pokerlib::{
    game::entities::{Card, Chips, Deck, Player, PlayerId, SeatIndex},
    table::{ClientMessage, ConfigError, Notification, Table, TableConfig, TableError, UserCommand},
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid table config: {0}")]
    Config(#[from] ConfigError),
    #[error("couldn't seat player {player}: {source}")]
    Seat { player: PlayerId, source: TableError },
}

/// A player seated before any command runs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ScriptPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub seat: Option<SeatIndex>,
    /// Starting stack. Defaults to the table buy-in.
    #[serde(default)]
    pub stack: Option<Chips>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub config: TableConfig,
    pub players: Vec<ScriptPlayer>,
    /// Cards to deal from, top first. Each `StartRound` takes the next
    /// entry; once they run out decks are shuffled as usual.
    #[serde(default)]
    pub decks: Vec<Vec<Card>>,
    #[serde(default)]
    pub commands: Vec<ClientMessage>,
}

impl Script {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScriptError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        Self::from_reader(File::open(path)?)
    }
}

/// A command the table refused. The table was left unchanged.
#[derive(Debug, PartialEq)]
pub struct Rejection {
    /// Position of the command in the script.
    pub index: usize,
    pub message: ClientMessage,
    pub error: TableError,
}

#[derive(Debug)]
pub struct Replay {
    pub table: Table,
    pub notifications: Vec<Notification>,
    pub rejections: Vec<Rejection>,
}

fn log_notifications(table: &Table, notifications: &[Notification]) {
    for notification in notifications {
        match notification {
            Notification::Broadcast(event) => info!("table {}: {event}", table.id()),
            Notification::Private { .. } => debug!("table {}: {notification}", table.id()),
        }
    }
}

/// Build the table, seat the players and run every command. Rejected
/// commands are logged and collected, they don't stop the replay.
pub fn replay(script: Script) -> Result<Replay, ScriptError> {
    let Script {
        config,
        players,
        decks,
        commands,
    } = script;
    let buy_in = config.buy_in;
    let table_id = config.table_id;
    let mut table = Table::new(config)?;
    let mut notifications = Vec::new();

    for player in players {
        let stack = player.stack.unwrap_or(buy_in);
        let seated = Player::new(table_id, player.id, &player.name, stack);
        let events = table
            .seat(seated, player.seat)
            .map_err(|source| ScriptError::Seat {
                player: player.id,
                source,
            })?;
        log_notifications(&table, &events);
        notifications.extend(events);
    }

    let mut decks = decks.into_iter();
    let mut rejections = Vec::new();
    for (index, message) in commands.into_iter().enumerate() {
        if message.command == UserCommand::StartRound && table.round().is_none() {
            if let Some(cards) = decks.next() {
                table.stack_next_deck(Deck::stacked(&cards));
            }
        }
        match table.apply(message.player, message.command.clone()) {
            Ok(events) => {
                log_notifications(&table, &events);
                notifications.extend(events);
            }
            Err(error) => {
                warn!(
                    "table {}: command {index} ({}) from #{} rejected: {error}",
                    table.id(),
                    message.command,
                    message.player
                );
                rejections.push(Rejection { index, message, error });
            }
        }
    }

    Ok(Replay {
        table,
        notifications,
        rejections,
    })
}
