//! Chip accounting for a single round.
//!
//! Every chip that leaves a stack is recorded as a [`Wager`] in an
//! append-only ledger. Pot totals, per-street contributions and side pot
//! tiers are computed from the ledger instead of being tracked alongside it,
//! so the pot can never disagree with what players put in.

use serde::{Deserialize, Serialize};
use std::{cmp::min, collections::BTreeSet, fmt};

use super::{
    entities::{Chips, PlayerId},
    round::Phase,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum WagerKind {
    SmallBlind,
    BigBlind,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for WagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::SmallBlind => "small blind",
            Self::BigBlind => "big blind",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all-in",
        };
        write!(f, "{repr}")
    }
}

/// One chip movement from a stack into the pot.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Wager {
    pub player: PlayerId,
    pub street: Phase,
    pub kind: WagerKind,
    pub amount: Chips,
}

/// A slice of the pot. Only `eligible` players can win it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SidePot {
    /// Contribution level this tier is capped at.
    pub cap: Chips,
    pub amount: Chips,
    /// Eligible players, in the order they were given to
    /// [`Pot::side_pots`].
    pub eligible: Vec<PlayerId>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Pot {
    ledger: Vec<Wager>,
}

impl Pot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player: PlayerId, street: Phase, kind: WagerKind, amount: Chips) {
        if amount > 0 {
            self.ledger.push(Wager {
                player,
                street,
                kind,
                amount,
            });
        }
    }

    pub fn wagers(&self) -> &[Wager] {
        &self.ledger
    }

    pub fn total(&self) -> Chips {
        self.ledger.iter().map(|wager| wager.amount).sum()
    }

    /// Everything `player` has put in this round.
    pub fn contributed(&self, player: PlayerId) -> Chips {
        self.ledger
            .iter()
            .filter(|wager| wager.player == player)
            .map(|wager| wager.amount)
            .sum()
    }

    /// What `player` has put in on `street`.
    pub fn street_contribution(&self, player: PlayerId, street: Phase) -> Chips {
        self.ledger
            .iter()
            .filter(|wager| wager.player == player && wager.street == street)
            .map(|wager| wager.amount)
            .sum()
    }

    /// Split the pot into tiers at the distinct contribution levels of the
    /// players in `contenders` (everyone who hasn't folded). Chips that
    /// folded players put in above the highest level land in the top tier.
    /// Tiers are returned from the lowest cap (the main pot) upwards.
    pub fn side_pots(&self, contenders: &[PlayerId]) -> Vec<SidePot> {
        let contributors: BTreeSet<PlayerId> = self.ledger.iter().map(|wager| wager.player).collect();
        let contributions: Vec<(PlayerId, Chips)> = contributors
            .into_iter()
            .map(|player| (player, self.contributed(player)))
            .collect();
        let levels: BTreeSet<Chips> = contenders
            .iter()
            .map(|player| self.contributed(*player))
            .filter(|level| *level > 0)
            .collect();
        let Some(&top) = levels.last() else {
            return Vec::new();
        };

        let mut side_pots = Vec::with_capacity(levels.len());
        let mut prev = 0;
        for cap in levels {
            let mut amount: Chips = contributions
                .iter()
                .map(|(_, contribution)| min(*contribution, cap) - min(*contribution, prev))
                .sum();
            if cap == top {
                amount += contributions
                    .iter()
                    .map(|(_, contribution)| contribution.saturating_sub(top))
                    .sum::<Chips>();
            }
            let eligible = contenders
                .iter()
                .copied()
                .filter(|player| self.contributed(*player) >= cap)
                .collect();
            side_pots.push(SidePot {
                cap,
                amount,
                eligible,
            });
            prev = cap;
        }
        side_pots
    }
}

/// Split `amount` evenly between `winners`. Odd chips all go to the first
/// winner, so callers should order winners clockwise from the button.
pub fn split(amount: Chips, winners: &[PlayerId]) -> Vec<(PlayerId, Chips)> {
    let Some(num_winners) = Chips::try_from(winners.len()).ok().filter(|n| *n > 0) else {
        return Vec::new();
    };
    let share = amount / num_winners;
    let remainder = amount % num_winners;
    winners
        .iter()
        .enumerate()
        .map(|(idx, winner)| {
            let bonus = if idx == 0 { remainder } else { 0 };
            (*winner, share + bonus)
        })
        .collect()
}
