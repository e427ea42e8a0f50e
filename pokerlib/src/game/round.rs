//! A single hand, from posting blinds to paying out the pot.
//!
//! A [`Round`] only knows player ids, seats and starting stacks. It never
//! touches the table's players directly; the table reads the settled stacks
//! back once the round reports [`Phase::Finished`].

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{cmp::min, collections::VecDeque, fmt};
use thiserror::Error;

use super::{
    constants::{MAX_PLAYERS, NUM_COMMUNITY_CARDS, NUM_HOLE_CARDS},
    entities::{
        Action, ActionChoice, ActionChoices, BetAction, Blinds, Card, Chips, Deck, HandStrength, PlayerId,
        PlayerStatus, SeatIndex,
    },
    functional,
    policy::{ShowdownPolicy, ShowdownRule},
    pot::{self, Pot, SidePot, WagerKind},
};
use crate::table::messages::{Notification, PrivateEvent, TableEvent};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Phase {
    WaitingForPlayers,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl Phase {
    pub fn is_betting(self) -> bool {
        matches!(self, Self::Preflop | Self::Flop | Self::Turn | Self::River)
    }

    /// The street that follows this one and how many board cards it deals.
    fn next_street(self) -> Option<(Self, usize)> {
        match self {
            Self::Preflop => Some((Self::Flop, 3)),
            Self::Flop => Some((Self::Turn, 1)),
            Self::Turn => Some((Self::River, 1)),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::WaitingForPlayers => "waiting for players",
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// Why an action from the player to act was refused.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum IllegalAction {
    #[error("can't check facing a bet")]
    CannotCheck,
    #[error("nothing to call")]
    NothingToCall,
    #[error("raise must be to at least {min}")]
    RaiseTooSmall { min: Chips },
    #[error("only {available} chips available")]
    InsufficientChips { available: Chips },
    #[error("betting wasn't reopened")]
    BettingNotReopened,
    #[error("must show to claim a pot")]
    MustShow,
}

#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum RoundError {
    #[error("not your turn")]
    OutOfTurn,
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    #[error("betting is closed")]
    BettingClosed,
    #[error("not at showdown")]
    NotInShowdown,
    #[error("player {0} is not in this round")]
    NotParticipating(PlayerId),
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("can't deal {0} players from one deck")]
    TooManyPlayers(usize),
    #[error("stacks add up to more than {} chips", Chips::MAX)]
    TooManyChips,
}

/// A player dealt into a round.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entrant {
    pub id: PlayerId,
    pub seat: SeatIndex,
    pub stack: Chips,
}

#[derive(Clone, Debug)]
struct Participant {
    id: PlayerId,
    seat: SeatIndex,
    starting_stack: Chips,
    status: PlayerStatus,
    cards: Vec<Card>,
    /// Still has to act on this street.
    needs_action: bool,
    /// Cleared when only an incomplete all-in raise happened since the
    /// player last acted.
    can_raise: bool,
    mucked: bool,
    /// Left the table mid-round. The id may be seated again before the
    /// round ends, so it must not be settled.
    left: bool,
}

#[derive(Debug)]
pub struct Round {
    /// Seat order.
    participants: Vec<Participant>,
    button: usize,
    to_act: Option<usize>,
    phase: Phase,
    pot: Pot,
    blinds: Blinds,
    current_bet: Chips,
    min_raise: Chips,
    board: Vec<Card>,
    deck: Deck,
    policy: ShowdownRule,
    /// Last full or all-in raiser on the most recent street with betting.
    last_aggressor: Option<usize>,
    showdown_queue: VecDeque<usize>,
    payouts: Vec<(PlayerId, Chips)>,
}

impl Round {
    /// Post blinds, deal hole cards and prompt the first player.
    ///
    /// `entrants` must be in seat order; those without chips are left out.
    /// `button` indexes into the remaining entrants. `deck` is dealt from
    /// as-is, so shuffle it first.
    pub fn start(
        entrants: Vec<Entrant>,
        button: usize,
        blinds: &Blinds,
        deck: Deck,
        policy: ShowdownRule,
    ) -> Result<(Self, Vec<Notification>), RoundError> {
        let participants: Vec<Participant> = entrants
            .into_iter()
            .filter(|entrant| entrant.stack > 0)
            .map(|entrant| Participant {
                id: entrant.id,
                seat: entrant.seat,
                starting_stack: entrant.stack,
                status: PlayerStatus::Active,
                cards: Vec::with_capacity(NUM_HOLE_CARDS),
                needs_action: true,
                can_raise: true,
                mucked: false,
                left: false,
            })
            .collect();
        if participants.len() < 2 {
            return Err(RoundError::NotEnoughPlayers);
        }
        let cards_needed = participants.len() * NUM_HOLE_CARDS + NUM_COMMUNITY_CARDS;
        if participants.len() > MAX_PLAYERS || cards_needed > deck.remaining() {
            return Err(RoundError::TooManyPlayers(participants.len()));
        }
        let total_chips: u64 = participants.iter().map(|p| u64::from(p.starting_stack)).sum();
        if total_chips > u64::from(Chips::MAX) {
            return Err(RoundError::TooManyChips);
        }

        let button = button % participants.len();
        let mut round = Self {
            participants,
            button,
            to_act: None,
            phase: Phase::Preflop,
            pot: Pot::new(),
            blinds: blinds.clone(),
            current_bet: blinds.big,
            min_raise: blinds.big,
            board: Vec::new(),
            deck,
            policy,
            last_aggressor: None,
            showdown_queue: VecDeque::new(),
            payouts: Vec::new(),
        };

        let mut events = Vec::new();
        let small_blind = round.offset(button, 1);
        let big_blind = round.offset(button, 2);
        let amount = round.post(small_blind, blinds.small, WagerKind::SmallBlind);
        events.push(
            TableEvent::SmallBlindPosted {
                player: round.participants[small_blind].id,
                amount,
            }
            .into(),
        );
        let amount = round.post(big_blind, blinds.big, WagerKind::BigBlind);
        events.push(
            TableEvent::BigBlindPosted {
                player: round.participants[big_blind].id,
                amount,
            }
            .into(),
        );
        events.push(
            TableEvent::RoundStarted {
                button: round.participants[button].id,
            }
            .into(),
        );
        info!(
            "round started with {} players, #{} has the button",
            round.participants.len(),
            round.participants[button].id
        );

        round.deal_hole_cards(&mut events);
        round.advance(big_blind, &mut events);
        Ok((round, events))
    }

    /// Apply `action` from `player`. Nothing changes when an error is
    /// returned.
    pub fn submit(&mut self, player: PlayerId, action: Action) -> Result<(Phase, Vec<Notification>), RoundError> {
        let mut events = Vec::new();
        match action {
            Action::Show | Action::Muck => self.choose(player, action, &mut events)?,
            _ => self.bet(player, action, &mut events)?,
        }
        Ok((self.phase, events))
    }

    /// Take `player` out of the hand, e.g. because they left the table.
    /// They're folded and whatever they put in stays in the pot.
    pub fn remove_player(&mut self, player: PlayerId) -> Result<(Phase, Vec<Notification>), RoundError> {
        let idx = self.index_of(player).ok_or(RoundError::NotParticipating(player))?;
        self.participants[idx].left = true;
        let mut events = Vec::new();
        if self.phase == Phase::Finished || self.participants[idx].status == PlayerStatus::Folded {
            return Ok((self.phase, events));
        }

        let participant = &mut self.participants[idx];
        participant.status = PlayerStatus::Folded;
        participant.needs_action = false;
        debug!("#{player} removed from the round");

        if self.num_in_hand() == 1 {
            self.finish_uncontested(&mut events);
        } else if self.phase == Phase::Showdown {
            if self.to_act == Some(idx) || self.num_contenders() <= 1 {
                self.continue_showdown(&mut events);
            }
        } else {
            match self.to_act {
                Some(current) if current == idx => self.advance(idx, &mut events),
                Some(current) if self.betting_done() => self.advance(current, &mut events),
                _ => {}
            }
        }
        Ok((self.phase, events))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn button(&self) -> PlayerId {
        self.participants[self.button].id
    }

    pub fn to_act(&self) -> Option<PlayerId> {
        self.to_act.map(|idx| self.participants[idx].id)
    }

    /// Betting choices of the player to act.
    pub fn action_choices(&self) -> Option<ActionChoices> {
        if !self.phase.is_betting() {
            return None;
        }
        self.to_act.map(|idx| self.choices_at(idx))
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn pot_total(&self) -> Chips {
        self.pot.total()
    }

    /// Current pot tiers for the players still in the hand.
    pub fn side_pots(&self) -> Vec<SidePot> {
        self.pot.side_pots(&self.clockwise_contenders())
    }

    /// Participant ids and seats in seat order.
    pub fn participants(&self) -> Vec<(PlayerId, SeatIndex)> {
        self.participants.iter().map(|p| (p.id, p.seat)).collect()
    }

    pub fn is_participating(&self, player: PlayerId) -> bool {
        self.index_of(player).is_some()
    }

    /// Whether `player` was dealt in and then removed with
    /// [`Round::remove_player`].
    pub fn has_left(&self, player: PlayerId) -> bool {
        self.index_of(player)
            .is_some_and(|idx| self.participants[idx].left)
    }

    pub fn status(&self, player: PlayerId) -> Option<PlayerStatus> {
        self.index_of(player).map(|idx| self.participants[idx].status)
    }

    pub fn hole_cards(&self, player: PlayerId) -> Option<&[Card]> {
        self.index_of(player).map(|idx| self.participants[idx].cards.as_slice())
    }

    pub fn contributed(&self, player: PlayerId) -> Chips {
        self.pot.contributed(player)
    }

    pub fn street_contribution(&self, player: PlayerId) -> Chips {
        self.pot.street_contribution(player, self.phase)
    }

    /// Chips behind, plus winnings once the round is finished.
    pub fn stack(&self, player: PlayerId) -> Option<Chips> {
        self.index_of(player).map(|idx| self.stack_at(idx) + self.payout_at(idx))
    }

    /// [`Round::stack`] for every participant, in seat order.
    pub fn stacks(&self) -> Vec<(PlayerId, Chips)> {
        (0..self.participants.len())
            .map(|idx| (self.participants[idx].id, self.stack_at(idx) + self.payout_at(idx)))
            .collect()
    }

    /// What each winner took, empty until the round is finished.
    pub fn payouts(&self) -> &[(PlayerId, Chips)] {
        &self.payouts
    }

    pub fn policy(&self) -> ShowdownRule {
        self.policy
    }

    fn bet(&mut self, player: PlayerId, action: Action, events: &mut Vec<Notification>) -> Result<(), RoundError> {
        if !self.phase.is_betting() {
            return Err(RoundError::BettingClosed);
        }
        let idx = self.turn_of(player)?;
        let street_bet = self.street_bet(idx);
        let stack = self.stack_at(idx);

        let (bet_action, chips) = match action {
            Action::Check => {
                if street_bet != self.current_bet {
                    return Err(IllegalAction::CannotCheck.into());
                }
                (BetAction::Check, 0)
            }
            Action::Call => {
                if self.current_bet <= street_bet {
                    return Err(IllegalAction::NothingToCall.into());
                }
                let chips = min(self.current_bet - street_bet, stack);
                let bet_action = if chips == stack { BetAction::AllIn } else { BetAction::Call };
                (bet_action, chips)
            }
            Action::Raise { amount } => {
                let available = street_bet + stack;
                let min_total = self.current_bet + self.min_raise;
                if amount > available {
                    return Err(IllegalAction::InsufficientChips { available }.into());
                }
                if amount <= self.current_bet || (amount < min_total && amount != available) {
                    return Err(IllegalAction::RaiseTooSmall { min: min_total }.into());
                }
                if !self.participants[idx].can_raise {
                    return Err(IllegalAction::BettingNotReopened.into());
                }
                let bet_action = if amount == available { BetAction::AllIn } else { BetAction::Raise };
                (bet_action, amount - street_bet)
            }
            Action::Fold => (BetAction::Fold, 0),
            Action::Show | Action::Muck => return Err(RoundError::NotInShowdown),
        };

        match bet_action {
            BetAction::Check => {}
            BetAction::Fold => self.participants[idx].status = PlayerStatus::Folded,
            BetAction::Call | BetAction::Raise | BetAction::AllIn => {
                let kind = match bet_action {
                    BetAction::Call => WagerKind::Call,
                    BetAction::Raise => WagerKind::Raise,
                    _ => WagerKind::AllIn,
                };
                self.pot.record(player, self.phase, kind, chips);
                let total = street_bet + chips;
                if total > self.current_bet {
                    self.reopen(idx, total);
                }
                if self.stack_at(idx) == 0 {
                    self.participants[idx].status = PlayerStatus::AllIn;
                }
            }
        }
        self.participants[idx].needs_action = false;
        debug!("#{player} {bet_action} ({chips} chips) on the {}", self.phase);
        events.push(
            TableEvent::PlayerActed {
                player,
                action: bet_action,
                amount: (chips > 0).then_some(chips),
            }
            .into(),
        );

        if self.num_in_hand() == 1 {
            self.finish_uncontested(events);
        } else {
            self.advance(idx, events);
        }
        Ok(())
    }

    /// Raise the bet to `total` on behalf of `idx`. A full raise lets
    /// everyone raise again; an incomplete all-in only makes players call
    /// the difference.
    fn reopen(&mut self, idx: usize, total: Chips) {
        let full = total >= self.current_bet + self.min_raise;
        if full {
            self.min_raise = total - self.current_bet;
        }
        for (other_idx, other) in self.participants.iter_mut().enumerate() {
            if other_idx == idx || other.status != PlayerStatus::Active {
                continue;
            }
            if full {
                other.can_raise = true;
            } else if !other.needs_action {
                other.can_raise = false;
            }
            other.needs_action = true;
        }
        self.current_bet = total;
        self.last_aggressor = Some(idx);
    }

    fn choose(&mut self, player: PlayerId, action: Action, events: &mut Vec<Notification>) -> Result<(), RoundError> {
        if self.phase != Phase::Showdown {
            return Err(RoundError::NotInShowdown);
        }
        let idx = self.turn_of(player)?;
        if action == Action::Muck {
            if self.must_show(idx) {
                return Err(IllegalAction::MustShow.into());
            }
            self.participants[idx].mucked = true;
            debug!("#{player} mucked");
            events.push(TableEvent::PlayerMucked { player }.into());
        } else {
            self.reveal(idx, events);
        }
        self.continue_showdown(events);
        Ok(())
    }

    fn turn_of(&self, player: PlayerId) -> Result<usize, RoundError> {
        let idx = self.index_of(player).ok_or(RoundError::NotParticipating(player))?;
        if self.to_act != Some(idx) {
            return Err(RoundError::OutOfTurn);
        }
        Ok(idx)
    }

    fn post(&mut self, idx: usize, blind: Chips, kind: WagerKind) -> Chips {
        let amount = min(blind, self.stack_at(idx));
        self.pot.record(self.participants[idx].id, Phase::Preflop, kind, amount);
        if self.stack_at(idx) == 0 {
            let participant = &mut self.participants[idx];
            participant.status = PlayerStatus::AllIn;
            participant.needs_action = false;
        }
        amount
    }

    fn deal_hole_cards(&mut self, events: &mut Vec<Notification>) {
        let num_players = self.participants.len();
        for _ in 0..NUM_HOLE_CARDS {
            for k in 1..=num_players {
                let idx = self.offset(self.button, k);
                let card = self.deck.deal_card();
                self.participants[idx].cards.push(card);
            }
        }
        for k in 1..=num_players {
            let participant = &self.participants[self.offset(self.button, k)];
            events.push(Notification::Private {
                to: participant.id,
                event: PrivateEvent::HoleCardsDealt {
                    cards: participant.cards.clone(),
                },
            });
        }
    }

    /// Prompt the next player after `from` who owes action, or close the
    /// street if nobody does.
    fn advance(&mut self, from: usize, events: &mut Vec<Notification>) {
        match self.next_to_act(from) {
            Some(idx) => {
                self.to_act = Some(idx);
                let player = self.participants[idx].id;
                events.push(TableEvent::PlayerActionRequired { player }.into());
                events.push(Notification::Private {
                    to: player,
                    event: PrivateEvent::TurnSignal {
                        choices: self.choices_at(idx),
                    },
                });
            }
            None => {
                self.to_act = None;
                self.end_street(events);
            }
        }
    }

    fn end_street(&mut self, events: &mut Vec<Notification>) {
        while let Some((street, num_cards)) = self.phase.next_street() {
            self.phase = street;
            let cards: Vec<Card> = (0..num_cards).map(|_| self.deck.deal_card()).collect();
            self.board.extend(&cards);
            self.current_bet = 0;
            self.min_raise = self.blinds.big;
            for participant in &mut self.participants {
                if participant.status == PlayerStatus::Active {
                    participant.needs_action = true;
                    participant.can_raise = true;
                }
            }
            debug!("dealt the {street}");
            events.push(TableEvent::StreetAdvanced { phase: street, cards }.into());

            if !self.betting_done() {
                self.last_aggressor = None;
                self.advance(self.button, events);
                return;
            }
        }
        self.showdown(events);
    }

    fn showdown(&mut self, events: &mut Vec<Notification>) {
        self.phase = Phase::Showdown;
        self.to_act = None;
        let start = self.last_aggressor.unwrap_or(self.button);
        let order: Vec<usize> = (1..=self.participants.len())
            .map(|k| self.offset(start, k))
            .filter(|idx| self.participants[*idx].status != PlayerStatus::Folded)
            .collect();
        debug!("showdown between {} players", order.len());
        if self.policy.prompts_for_choice() {
            self.showdown_queue = order.into();
            self.continue_showdown(events);
        } else {
            for idx in order {
                self.reveal(idx, events);
            }
            self.award(events);
        }
    }

    /// Prompt the next undecided contender, or pay out once nobody is left
    /// to decide or a single contender remains.
    fn continue_showdown(&mut self, events: &mut Vec<Notification>) {
        while self.num_contenders() > 1 {
            let Some(idx) = self.showdown_queue.pop_front() else {
                break;
            };
            let participant = &self.participants[idx];
            if participant.status == PlayerStatus::Folded || participant.mucked {
                continue;
            }
            let player = participant.id;
            self.to_act = Some(idx);
            events.push(TableEvent::PlayerActionRequired { player }.into());
            events.push(Notification::Private {
                to: player,
                event: PrivateEvent::ShowdownChoicePrompt {
                    must_show: self.must_show(idx),
                },
            });
            return;
        }
        self.to_act = None;
        self.award(events);
    }

    /// Whether mucking would leave a contested pot tier with nobody to
    /// claim it.
    fn must_show(&self, idx: usize) -> bool {
        let player = self.participants[idx].id;
        self.side_pots().iter().any(|side_pot| {
            side_pot.eligible.len() > 1
                && side_pot.eligible.contains(&player)
                && side_pot
                    .eligible
                    .iter()
                    .filter(|id| **id != player)
                    .filter_map(|id| self.index_of(*id))
                    .all(|other| self.participants[other].mucked)
        })
    }

    fn reveal(&self, idx: usize, events: &mut Vec<Notification>) {
        let participant = &self.participants[idx];
        let mut cards = participant.cards.clone();
        cards.extend(&self.board);
        let hand = functional::rank(&cards).ok();
        events.push(
            TableEvent::HandRevealed {
                player: participant.id,
                cards: participant.cards.clone(),
                hand,
            }
            .into(),
        );
    }

    fn award(&mut self, events: &mut Vec<Notification>) {
        let mut payouts = vec![0; self.participants.len()];
        for (tier, side_pot) in self.side_pots().into_iter().enumerate() {
            let eligible: Vec<usize> = side_pot
                .eligible
                .iter()
                .filter_map(|id| self.index_of(*id))
                .collect();
            let mut claimants: Vec<usize> = eligible
                .iter()
                .copied()
                .filter(|idx| !self.participants[*idx].mucked)
                .collect();
            // Only reachable for a tier nobody else could match, which goes
            // back to whoever put it in.
            if claimants.is_empty() {
                claimants = eligible;
            }
            let hands: Vec<HandStrength> = claimants.iter().map(|idx| self.strength_at(*idx)).collect();
            let winners: Vec<PlayerId> = functional::argmax(&hands)
                .into_iter()
                .map(|i| self.participants[claimants[i]].id)
                .collect();
            for (winner, share) in pot::split(side_pot.amount, &winners) {
                if let Some(idx) = self.index_of(winner) {
                    payouts[idx] += share;
                }
            }
            events.push(
                TableEvent::PotAwarded {
                    tier,
                    amount: side_pot.amount,
                    winners,
                }
                .into(),
            );
        }
        self.finish(payouts, events);
    }

    fn finish_uncontested(&mut self, events: &mut Vec<Notification>) {
        let Some(winner) = self
            .participants
            .iter()
            .position(|p| p.status != PlayerStatus::Folded)
        else {
            return;
        };
        if self.policy.reveals_uncontested_winner() {
            self.reveal(winner, events);
        }
        let amount = self.pot.total();
        events.push(
            TableEvent::PotAwarded {
                tier: 0,
                amount,
                winners: vec![self.participants[winner].id],
            }
            .into(),
        );
        let mut payouts = vec![0; self.participants.len()];
        payouts[winner] = amount;
        self.finish(payouts, events);
    }

    fn finish(&mut self, payouts: Vec<Chips>, events: &mut Vec<Notification>) {
        self.phase = Phase::Finished;
        self.to_act = None;
        self.payouts = self
            .participants
            .iter()
            .zip(payouts)
            .filter(|(_, amount)| *amount > 0)
            .map(|(participant, amount)| (participant.id, amount))
            .collect();
        info!("round finished, {} chips paid out", self.pot.total());
        events.push(
            TableEvent::RoundFinished {
                payouts: self.payouts.clone(),
            }
            .into(),
        );
    }

    fn choices_at(&self, idx: usize) -> ActionChoices {
        let street_bet = self.street_bet(idx);
        let stack = self.stack_at(idx);
        let mut choices = vec![ActionChoice::Fold];
        if street_bet >= self.current_bet {
            choices.push(ActionChoice::Check);
        } else {
            choices.push(ActionChoice::Call(min(self.current_bet - street_bet, stack)));
        }
        let available = street_bet + stack;
        if self.participants[idx].can_raise && available > self.current_bet {
            let min_total = self.current_bet + self.min_raise;
            if available > min_total {
                choices.push(ActionChoice::Raise(min_total));
            }
            choices.push(ActionChoice::AllIn(available));
        }
        ActionChoices::from(choices)
    }

    fn next_to_act(&self, from: usize) -> Option<usize> {
        if self.betting_done() {
            return None;
        }
        (1..=self.participants.len())
            .map(|k| self.offset(from, k))
            .find(|idx| self.owes_action(*idx))
    }

    /// Betting on the street is over once nobody owes action. A lone
    /// player with chips behind who already covers the bet has nobody left
    /// to bet against.
    fn betting_done(&self) -> bool {
        let active: Vec<usize> = (0..self.participants.len())
            .filter(|idx| self.participants[*idx].status == PlayerStatus::Active)
            .collect();
        match active.as_slice() {
            [] => true,
            [idx] if self.street_bet(*idx) >= self.current_bet => true,
            _ => !active.iter().any(|idx| self.owes_action(*idx)),
        }
    }

    fn owes_action(&self, idx: usize) -> bool {
        let participant = &self.participants[idx];
        participant.status == PlayerStatus::Active
            && (participant.needs_action || self.street_bet(idx) < self.current_bet)
    }

    fn num_in_hand(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status != PlayerStatus::Folded)
            .count()
    }

    fn num_contenders(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status != PlayerStatus::Folded && !p.mucked)
            .count()
    }

    /// Unfolded players, starting left of the button.
    fn clockwise_contenders(&self) -> Vec<PlayerId> {
        (1..=self.participants.len())
            .map(|k| &self.participants[self.offset(self.button, k)])
            .filter(|p| p.status != PlayerStatus::Folded)
            .map(|p| p.id)
            .collect()
    }

    fn strength_at(&self, idx: usize) -> HandStrength {
        let mut cards = self.participants[idx].cards.clone();
        cards.extend(&self.board);
        functional::eval(&cards)
    }

    fn stack_at(&self, idx: usize) -> Chips {
        let participant = &self.participants[idx];
        participant
            .starting_stack
            .saturating_sub(self.pot.contributed(participant.id))
    }

    fn payout_at(&self, idx: usize) -> Chips {
        let id = self.participants[idx].id;
        self.payouts
            .iter()
            .filter(|(player, _)| *player == id)
            .map(|(_, amount)| *amount)
            .sum()
    }

    fn street_bet(&self, idx: usize) -> Chips {
        self.pot.street_contribution(self.participants[idx].id, self.phase)
    }

    fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == player)
    }

    fn offset(&self, idx: usize, k: usize) -> usize {
        (idx + k) % self.participants.len()
    }
}
