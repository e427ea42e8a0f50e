//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ConfigError;
use crate::game::{
    constants::MAX_PLAYERS,
    entities::{Blinds, Chips, SeatIndex, TableId},
    policy::ShowdownRule,
};

/// What happens to a player who busts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuyPolicy {
    /// Stay seated and sit out until buying back in.
    #[default]
    Manual,
    /// Topped back up to the table buy-in when the round ends.
    Automatic,
}

impl fmt::Display for RebuyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuyPolicy::Manual => write!(f, "manual"),
            RebuyPolicy::Automatic => write!(f, "automatic"),
        }
    }
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub table_id: TableId,

    /// Number of seats (1 to 23)
    pub num_seats: usize,

    /// Starting stack for players who sit down
    pub buy_in: Chips,

    pub small_blind: Chips,

    pub big_blind: Chips,

    /// The first round's button goes to the first player at or after this seat
    pub initial_button: SeatIndex,

    pub showdown: ShowdownRule,

    pub rebuy: RebuyPolicy,

    /// Seed for shuffling. Without one the deck is seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_id: 1,
            num_seats: 10,
            buy_in: 1_000,
            small_blind: 5,
            big_blind: 10,
            initial_button: 0,
            showdown: ShowdownRule::default(),
            rebuy: RebuyPolicy::default(),
            seed: None,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_seats == 0 || self.num_seats > MAX_PLAYERS {
            return Err(ConfigError::InvalidSeatCount(self.num_seats));
        }

        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::InvalidBlind);
        }

        if self.big_blind < self.small_blind {
            return Err(ConfigError::BlindsOutOfOrder {
                small: self.small_blind,
                big: self.big_blind,
            });
        }

        if self.initial_button >= self.num_seats {
            return Err(ConfigError::InvalidButton(self.initial_button));
        }

        Ok(())
    }

    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::policy::NoMuck;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TableConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate() {
        let config = TableConfig {
            num_seats: 24,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSeatCount(24)));

        let config = TableConfig {
            num_seats: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSeatCount(0)));

        let config = TableConfig {
            small_blind: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBlind));

        let config = TableConfig {
            small_blind: 20,
            big_blind: 10,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlindsOutOfOrder { small: 20, big: 10 })
        );

        let config = TableConfig {
            num_seats: 3,
            initial_button: 3,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidButton(3)));
    }

    #[test]
    fn test_equal_blinds_allowed() {
        let config = TableConfig {
            small_blind: 10,
            big_blind: 10,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: TableConfig =
            serde_json::from_str(r#"{"num_seats": 3, "buy_in": 150, "showdown": "no_muck", "rebuy": "automatic"}"#)
                .unwrap();
        assert_eq!(config.num_seats, 3);
        assert_eq!(config.buy_in, 150);
        assert_eq!(config.showdown, ShowdownRule::NoMuck(NoMuck));
        assert_eq!(config.rebuy, RebuyPolicy::Automatic);
        assert_eq!(config.blinds(), Blinds { small: 5, big: 10 });
    }
}
