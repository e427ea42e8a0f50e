use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
    mem::discriminant,
};

use super::constants::{self, DECK_SIZE};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

pub const ACE: Value = 14;

/// A card is a tuple of a value (deuce=2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Strength of a five card hand. The derived ordering compares the rank
/// first and then the tie-break values, most significant first.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandStrength {
    pub rank: Rank,
    pub values: Vec<Value>,
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .map(|v| match v {
                14 => "A".to_string(),
                13 => "K".to_string(),
                12 => "Q".to_string(),
                11 => "J".to_string(),
                v => v.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} ({values})", self.rank)
    }
}

#[derive(Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    pub deck_idx: usize,
}

impl Deck {
    /// Deal the next card. A deck is never asked for more than
    /// `MAX_PLAYERS` hands plus a board, which always fits.
    pub fn deal_card(&mut self) -> Card {
        let card = self.cards[self.deck_idx];
        self.deck_idx += 1;
        card
    }

    pub fn remaining(&self) -> usize {
        DECK_SIZE - self.deck_idx
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }

    /// A deck that deals `top` first, in order, followed by the remaining
    /// cards in their default order. Duplicates in `top` are dealt once.
    #[must_use]
    pub fn stacked(top: &[Card]) -> Self {
        let mut order: Vec<Card> = Vec::with_capacity(DECK_SIZE);
        for card in top {
            if !order.contains(card) {
                order.push(*card);
            }
        }
        for card in Self::default().cards {
            if !order.contains(&card) {
                order.push(card);
            }
        }
        let mut cards = Self::default().cards;
        cards.copy_from_slice(&order[..DECK_SIZE]);
        Self { cards, deck_idx: 0 }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards: [Card; DECK_SIZE] = [Card(2, Suit::Club); DECK_SIZE];
        for (i, value) in (2u8..=ACE).enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card(value, suit);
            }
        }
        Self { cards, deck_idx: 0 }
    }
}

/// Type alias for whole chips. Stacks and bets are never negative.
pub type Chips = u32;

pub type PlayerId = u64;

pub type TableId = u64;

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let mut username: String = s
            .trim()
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        if let Some((idx, _)) = username.char_indices().nth(constants::MAX_NAME_LENGTH) {
            username.truncate(idx);
        }
        Self(username)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PlayerStatus {
    /// In the hand with chips behind, or seated and ready for the next one.
    Active,
    /// Out of the current hand. Chips already put in stay in the pot.
    Folded,
    /// Whole stack is in the pot.
    AllIn,
    /// Seated but not dealt in (no chips).
    SittingOut,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Active => "active",
            Self::Folded => "folded",
            Self::AllIn => "all-in",
            Self::SittingOut => "sitting out",
        };
        write!(f, "{repr:11}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub table_id: TableId,
    pub name: Username,
    pub stack: Chips,
    pub status: PlayerStatus,
}

impl Player {
    #[must_use]
    pub fn new(table_id: TableId, id: PlayerId, name: &str, stack: Chips) -> Self {
        let status = if stack == 0 {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
        Self {
            id,
            table_id,
            name: Username::new(name),
            stack,
            status,
        }
    }

    /// Status between rounds follows the stack.
    pub fn reset(&mut self) {
        self.status = if self.stack == 0 {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (#{}, {} chips)", self.name, self.id, self.stack)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

/// What a player submits on their turn.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    Check,
    Call,
    /// Raise to `amount` total chips on this street.
    Raise { amount: Chips },
    Fold,
    /// Reveal cards at a choice-to-show showdown.
    Show,
    /// Concede at a choice-to-show showdown without revealing.
    Muck,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Check => "checks",
            Self::Call => "calls",
            Self::Raise { amount } => &format!("raises to {amount}"),
            Self::Fold => "folds",
            Self::Show => "shows",
            Self::Muck => "mucks",
        };
        write!(f, "{repr}")
    }
}

/// What an accepted betting action turned into once chips moved.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BetAction {
    Check,
    Call,
    Raise,
    AllIn,
    Fold,
}

impl fmt::Display for BetAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all-in",
            Self::Fold => "fold",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ActionChoice {
    Check,
    /// Chips needed to call.
    Call(Chips),
    /// Smallest legal raise-to total.
    Raise(Chips),
    /// Raise-to total when shoving the whole stack.
    AllIn(Chips),
    Fold,
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Check => "check".to_string(),
            Self::Call(amount) => format!("call (== {amount})"),
            Self::Raise(amount) => format!("raise (>= {amount})"),
            Self::AllIn(amount) => format!("all-in (== {amount})"),
            Self::Fold => "fold".to_string(),
        };
        write!(f, "{repr}")
    }
}

// Choices are compared by variant only. The amounts are informational,
// actual bet validation happens in the round.
impl Eq for ActionChoice {}

impl Hash for ActionChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
    }
}

impl PartialEq for ActionChoice {
    fn eq(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

/// The set of choices offered to the player to act.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActionChoices(pub HashSet<ActionChoice>);

impl ActionChoices {
    pub fn contains(&self, action: &Action) -> bool {
        let action_choice = match action {
            Action::Check => ActionChoice::Check,
            Action::Call => ActionChoice::Call(0),
            Action::Raise { .. } => {
                return self.0.contains(&ActionChoice::Raise(0))
                    || self.0.contains(&ActionChoice::AllIn(0));
            }
            Action::Fold => ActionChoice::Fold,
            Action::Show | Action::Muck => return false,
        };
        self.0.contains(&action_choice)
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut choices: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        choices.sort();
        let num_options = choices.len();
        let repr = choices
            .into_iter()
            .enumerate()
            .map(|(i, repr)| match i {
                0 if num_options == 1 => repr,
                0 if num_options == 2 => format!("{repr} "),
                0 if num_options >= 3 => format!("{repr}, "),
                i if i == num_options - 1 && num_options != 1 => format!("or {repr}"),
                _ => format!("{repr}, "),
            })
            .collect::<String>();
        write!(f, "{repr}")
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionChoice>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect::<HashSet<_>>())
    }
}
