//! The table: seats players, runs rounds and routes commands.

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use super::{
    config::{RebuyPolicy, TableConfig},
    errors::{ConfigError, TableError},
    messages::{Notification, TableEvent, UserCommand},
};
use crate::game::{
    entities::{Action, Chips, Deck, Player, PlayerId, SeatIndex, TableId},
    round::{Entrant, Phase, Round},
    seats::{PlayerSeats, SeatError},
};

const MAX_CHIPS: u64 = Chips::MAX as u64;

/// A single poker table. Commands run to completion one at a time and
/// each returns the notifications it caused, in order.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    seats: PlayerSeats,
    round: Option<Round>,
    /// Seat that had the button last round.
    button: Option<SeatIndex>,
    next_deck: Option<Deck>,
    rng: StdRng,
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        let seats = vec![None; config.num_seats];
        Self::with_seats(config, seats)
    }

    /// Build a table with players already in their seats.
    pub fn with_seats(config: TableConfig, seats: Vec<Option<Player>>) -> Result<Self, ConfigError> {
        config.validate()?;
        if seats.len() != config.num_seats {
            return Err(ConfigError::SeatCountMismatch {
                expected: config.num_seats,
                actual: seats.len(),
            });
        }
        let mut ids = Vec::with_capacity(seats.len());
        for player in seats.iter().flatten() {
            if ids.contains(&player.id) {
                return Err(ConfigError::DuplicatePlayer(player.id));
            }
            ids.push(player.id);
        }
        let total: u64 = seats.iter().flatten().map(|player| u64::from(player.stack)).sum();
        if total > MAX_CHIPS {
            return Err(ConfigError::TooManyChips);
        }

        let mut seats = PlayerSeats::from(seats);
        for player in seats.players_mut() {
            player.table_id = config.table_id;
            player.reset();
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(
            "table {} ready with {} of {} seats taken, blinds {}",
            config.table_id,
            seats.num_occupied(),
            config.num_seats,
            config.blinds()
        );
        Ok(Self {
            config,
            seats,
            round: None,
            button: None,
            next_deck: None,
            rng,
        })
    }

    /// Run `command` on behalf of `player`. On error nothing changed and
    /// nothing was emitted.
    pub fn apply(&mut self, player: PlayerId, command: UserCommand) -> Result<Vec<Notification>, TableError> {
        let result = match &command {
            UserCommand::Sit { name, seat } => {
                let new_player = Player::new(self.config.table_id, player, name, self.config.buy_in);
                self.seat(new_player, *seat)
            }
            UserCommand::LeaveTable => self.unseat(player).map(|(_, events)| events),
            UserCommand::StartRound => self.start_round(player),
            UserCommand::Buy(amount) => self.buy(player, *amount),
            UserCommand::TakeAction(action) => self.take_action(player, *action),
        };
        if let Err(error) = &result {
            debug!("table {}: rejected {command} from #{player}: {error}", self.config.table_id);
        }
        result
    }

    /// Seat `player` with the chips they bring.
    pub fn seat(&mut self, mut player: Player, seat: Option<SeatIndex>) -> Result<Vec<Notification>, TableError> {
        player.table_id = self.config.table_id;
        player.reset();
        self.ensure_room(player.stack)?;
        let (id, name, stack) = (player.id, player.name.clone(), player.stack);
        let seat = self.seats.seat(player, seat)?;
        info!("table {}: {name} (#{id}) sat in seat {seat}", self.config.table_id);
        Ok(vec![
            TableEvent::PlayerSeated {
                player: id,
                name,
                seat,
                stack,
            }
            .into(),
        ])
    }

    /// Remove a player from the table. Mid-round they're folded first and
    /// leave with whatever they haven't put in the pot.
    pub fn unseat(&mut self, player: PlayerId) -> Result<(Player, Vec<Notification>), TableError> {
        let seat = self
            .seats
            .seat_of(player)
            .ok_or(SeatError::PlayerNotSeated(player))?;

        let mut round_events = Vec::new();
        let mut live_stack = None;
        let dealt_in = self.in_round(player);
        if let Some(round) = self.round.as_mut().filter(|_| dealt_in) {
            let (_, events) = round.remove_player(player)?;
            round_events = events;
            live_stack = round.stack(player);
        }

        let (_, mut removed) = self.seats.unseat(player)?;
        if let Some(stack) = live_stack {
            removed.stack = stack;
        }
        info!("table {}: #{player} left seat {seat}", self.config.table_id);

        let mut events = vec![
            TableEvent::PlayerLeft {
                player,
                seat,
                stack: removed.stack,
            }
            .into(),
        ];
        events.append(&mut round_events);
        self.sync_round(&mut events);
        Ok((removed, events))
    }

    fn start_round(&mut self, issuer: PlayerId) -> Result<Vec<Notification>, TableError> {
        if !self.seats.contains(issuer) {
            return Err(SeatError::PlayerNotSeated(issuer).into());
        }
        if self.round.is_some() {
            return Err(TableError::RoundInProgress);
        }
        let entrants: Vec<Entrant> = self
            .seats
            .occupied()
            .filter(|(_, player)| player.stack > 0)
            .map(|(seat, player)| Entrant {
                id: player.id,
                seat,
                stack: player.stack,
            })
            .collect();
        if entrants.len() < 2 {
            return Err(TableError::InsufficientPlayers);
        }

        let button_idx = match self.button {
            None => entrants
                .iter()
                .position(|entrant| entrant.seat >= self.config.initial_button),
            Some(prev) => entrants.iter().position(|entrant| entrant.seat > prev),
        }
        .unwrap_or(0);
        let button_seat = entrants[button_idx].seat;

        let deck = match self.next_deck.take() {
            Some(deck) => deck,
            None => {
                let mut deck = Deck::default();
                deck.shuffle(&mut self.rng);
                deck
            }
        };
        let (round, mut events) = Round::start(
            entrants,
            button_idx,
            &self.config.blinds(),
            deck,
            self.config.showdown,
        )?;
        self.button = Some(button_seat);
        self.round = Some(round);
        self.sync_round(&mut events);
        Ok(events)
    }

    fn buy(&mut self, player: PlayerId, amount: Chips) -> Result<Vec<Notification>, TableError> {
        if amount == 0 {
            return Err(TableError::InvalidAmount);
        }
        if self.in_round(player) {
            return Err(TableError::RoundInProgress);
        }
        if !self.seats.contains(player) {
            return Err(SeatError::PlayerNotSeated(player).into());
        }
        self.ensure_room(amount)?;
        let seated = self
            .seats
            .player_mut(player)
            .ok_or(SeatError::PlayerNotSeated(player))?;
        seated.stack += amount;
        seated.reset();
        let stack = seated.stack;
        debug!("table {}: #{player} bought {amount}", self.config.table_id);
        Ok(vec![TableEvent::PlayerBoughtIn { player, amount, stack }.into()])
    }

    fn take_action(&mut self, player: PlayerId, action: Action) -> Result<Vec<Notification>, TableError> {
        let round = self.round.as_mut().ok_or(TableError::NoActiveRound)?;
        let (_, mut events) = round.submit(player, action)?;
        self.sync_round(&mut events);
        Ok(events)
    }

    /// Mirror round statuses onto seated players, and settle stacks once the
    /// round is over.
    fn sync_round(&mut self, events: &mut Vec<Notification>) {
        let Some(round) = &self.round else {
            return;
        };
        for player in self.seats.players_mut() {
            if round.has_left(player.id) {
                continue;
            }
            if let Some(status) = round.status(player.id) {
                player.status = status;
            }
        }
        if round.phase() != Phase::Finished {
            return;
        }

        let Some(round) = self.round.take() else {
            return;
        };
        for (id, stack) in round.stacks() {
            if round.has_left(id) {
                continue;
            }
            if let Some(player) = self.seats.player_mut(id) {
                player.stack = stack;
            }
        }
        for player in self.seats.players_mut() {
            player.reset();
        }
        if self.config.rebuy == RebuyPolicy::Automatic && self.config.buy_in > 0 {
            let buy_in = self.config.buy_in;
            let mut in_play = self.chips_in_play();
            for player in self.seats.players_mut().filter(|player| player.stack == 0) {
                if in_play + u64::from(buy_in) > MAX_CHIPS {
                    debug!("table {}: no room to rebuy #{}", self.config.table_id, player.id);
                    continue;
                }
                in_play += u64::from(buy_in);
                player.stack = buy_in;
                player.reset();
                events.push(
                    TableEvent::PlayerBoughtIn {
                        player: player.id,
                        amount: buy_in,
                        stack: buy_in,
                    }
                    .into(),
                );
            }
        }
    }

    /// Whether `player` was dealt into the active round and is still there.
    fn in_round(&self, player: PlayerId) -> bool {
        self.round
            .as_ref()
            .is_some_and(|round| round.is_participating(player) && !round.has_left(player))
    }

    /// Every chip on the table: what seated players have behind plus the pot.
    fn chips_in_play(&self) -> u64 {
        let behind: u64 = self
            .players()
            .filter_map(|player| self.stack(player.id))
            .map(u64::from)
            .sum();
        behind + self.round.as_ref().map_or(0, |round| u64::from(round.pot_total()))
    }

    /// Refuse to bring in `amount` more chips if the table's chips would no
    /// longer fit in [`Chips`].
    fn ensure_room(&self, amount: Chips) -> Result<(), TableError> {
        if self.chips_in_play() + u64::from(amount) > MAX_CHIPS {
            return Err(TableError::InvalidAmount);
        }
        Ok(())
    }

    /// Deal the next round from `deck` instead of a freshly shuffled one.
    pub fn stack_next_deck(&mut self, deck: Deck) {
        self.next_deck = Some(deck);
    }

    pub fn id(&self) -> TableId {
        self.config.table_id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.round
            .as_ref()
            .map_or(Phase::WaitingForPlayers, Round::phase)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn seats(&self) -> &PlayerSeats {
        &self.seats
    }

    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.seats.player(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.occupied().map(|(_, player)| player)
    }

    /// Seat holding the button this round, or last round between rounds.
    pub fn button(&self) -> Option<SeatIndex> {
        self.button
    }

    /// Chips in front of `player`, counting what's already in the pot as
    /// gone while a round is running.
    pub fn stack(&self, player: PlayerId) -> Option<Chips> {
        self.round
            .as_ref()
            .filter(|_| self.in_round(player))
            .and_then(|round| round.stack(player))
            .or_else(|| self.seats.player(player).map(|p| p.stack))
    }
}
