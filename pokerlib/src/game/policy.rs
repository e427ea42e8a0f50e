//! How hands are revealed once betting is over.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[enum_dispatch]
pub trait ShowdownPolicy {
    /// Whether contenders decide one at a time to show or muck instead of
    /// having every hand turned over.
    fn prompts_for_choice(&self) -> bool;

    /// Whether a player left alone after everyone else folded still has to
    /// turn over their cards.
    fn reveals_uncontested_winner(&self) -> bool;
}

/// Every remaining hand is turned over at showdown.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RevealAll;

impl ShowdownPolicy for RevealAll {
    fn prompts_for_choice(&self) -> bool {
        false
    }

    fn reveals_uncontested_winner(&self) -> bool {
        false
    }
}

/// Contenders show or muck in turn. Mucking gives up every pot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ChoiceToShow;

impl ShowdownPolicy for ChoiceToShow {
    fn prompts_for_choice(&self) -> bool {
        true
    }

    fn reveals_uncontested_winner(&self) -> bool {
        false
    }
}

/// Nobody gets to hide their cards, not even a player everyone folded to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoMuck;

impl ShowdownPolicy for NoMuck {
    fn prompts_for_choice(&self) -> bool {
        false
    }

    fn reveals_uncontested_winner(&self) -> bool {
        true
    }
}

#[derive(Debug, Eq, Error, PartialEq)]
#[error("unknown showdown rule {0:?}")]
pub struct UnknownShowdownRule(pub String);

/// The showdown policy a table runs with. Serialized as its lowercase,
/// underscore separated name.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[enum_dispatch(ShowdownPolicy)]
#[serde(into = "String", try_from = "String")]
pub enum ShowdownRule {
    RevealAll(RevealAll),
    ChoiceToShow(ChoiceToShow),
    NoMuck(NoMuck),
}

impl Default for ShowdownRule {
    fn default() -> Self {
        Self::RevealAll(RevealAll)
    }
}

impl fmt::Display for ShowdownRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::RevealAll(_) => "reveal_all",
            Self::ChoiceToShow(_) => "choice_to_show",
            Self::NoMuck(_) => "no_muck",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for ShowdownRule {
    type Err = UnknownShowdownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reveal_all" => Ok(RevealAll.into()),
            "choice_to_show" => Ok(ChoiceToShow.into()),
            "no_muck" => Ok(NoMuck.into()),
            other => Err(UnknownShowdownRule(other.to_string())),
        }
    }
}

impl From<ShowdownRule> for String {
    fn from(rule: ShowdownRule) -> Self {
        rule.to_string()
    }
}

impl TryFrom<String> for ShowdownRule {
    type Error = UnknownShowdownRule;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
