use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{EventHub, TableEvent};
use crate::hand::{evaluate_hand, Category, HandStrength};
use crate::player::{Chips, Player, PlayerState, Seat, SeatIndex};
use crate::pot::Pot;
use crate::rules;
use crate::showdown::ShowdownResult;

/// Seating capacity of a table.
pub const MAX_SEATS: usize = 10;

/// The five ordered stages of a round. Strictly forward within a round;
/// reset to `PreFlop` when the next round starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Per-seat state visible to everyone at the table. Hole cards are included
/// (as wire strings) only for the viewer the snapshot was built for.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerPublicState {
    pub seat: SeatIndex,
    pub name: String,
    pub chips: Chips,
    pub state: PlayerState,
    pub current_bet: Chips,
    pub is_folded: bool,
    pub hand: Vec<String>,
}

/// One player's private view: own hole cards, the board, and the category
/// their cards currently make.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub seat: SeatIndex,
    pub hand: Vec<String>,
    pub community_cards: Vec<String>,
    pub rank: Category,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowdownPlayerDetail {
    pub name: String,
    pub seat: SeatIndex,
    pub hand: Vec<String>,
    pub rank: Category,
}

/// Full reveal for the terminal phase: every non-folded hand plus the
/// computed winners. Folded hands were cleared at fold time and never appear.
#[derive(Debug, Clone, Serialize)]
pub struct ShowdownDetails {
    pub community_cards: Vec<String>,
    pub players: Vec<ShowdownPlayerDetail>,
    pub winners: Vec<String>,
}

/// Authoritative single-table state machine. Owns the deck, the seats, the
/// pot and the phase; exposes seating, betting actions and showdown
/// resolution; emits notifications outward once each mutation completes.
///
/// One `Table` is one concurrency unit: every public operation is
/// synchronous, in-memory and bounded by the seat count, so a transport
/// layer serializes access with a single lock (or actor) per table. There is
/// no internal timeout concept — a turn timer lives outside and folds the
/// current player through the same entry points used for real actions.
pub struct Table {
    /// Occupied seats, kept sorted by seat index; turn order scans this.
    seats: Vec<Seat>,
    deck: Deck,
    pot: Pot,
    community: Vec<Card>,
    phase: GamePhase,
    /// Highest total contributed by any seat this betting round.
    current_bet: Chips,
    /// Index into `seats` of the seat whose turn it nominally is.
    current_index: usize,
    round_number: u32,
    round_started: bool,
    started_at: Option<DateTime<Utc>>,
    last_showdown: Option<ShowdownResult>,
    rng: ChaCha20Rng,
    events: EventHub,
}

impl Table {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Deterministic table: the seed drives every per-round deck shuffle.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seats: Vec::new(),
            deck: Deck::new_with_seed(seed),
            pot: Pot::default(),
            community: Vec::with_capacity(5),
            phase: GamePhase::PreFlop,
            current_bet: 0,
            current_index: 0,
            round_number: 0,
            round_started: false,
            started_at: None,
            last_showdown: None,
            rng: ChaCha20Rng::seed_from_u64(seed),
            events: EventHub::default(),
        }
    }

    /// Registers an outbound notification listener. Listeners run
    /// synchronously after each mutation completes and only ever see a
    /// shared reference, so they cannot re-enter the mutation path.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&TableEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(Box::new(listener));
    }

    // ---- seating ----------------------------------------------------------

    pub fn add_player(&mut self, name: &str, chips: Chips, seat: SeatIndex) -> Result<(), GameError> {
        if self.seats.len() >= MAX_SEATS {
            return Err(GameError::TableFull { max: MAX_SEATS });
        }
        if self.seats.iter().any(|s| s.player.name() == name) {
            return Err(GameError::DuplicateName {
                name: name.to_string(),
            });
        }
        if seat >= MAX_SEATS {
            return Err(GameError::InvalidSeat {
                seat,
                max: MAX_SEATS,
            });
        }
        if self.seats.iter().any(|s| s.player.seat() == seat) {
            return Err(GameError::SeatTaken { seat });
        }
        let pos = self
            .seats
            .iter()
            .position(|s| s.player.seat() > seat)
            .unwrap_or(self.seats.len());
        self.seats.insert(pos, Seat::new(Player::new(name, chips, seat)));
        if self.round_started && pos <= self.current_index {
            // keep the turn pointer on the seat it was on
            self.current_index += 1;
        }
        Ok(())
    }

    /// Idempotent. Removing the seat at or before the turn pointer pulls the
    /// pointer back so it stays in range; removing the last player clears
    /// the round and resets the phase.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let Some(idx) = self.seats.iter().position(|s| s.player.name() == name) else {
            return false;
        };
        self.seats.remove(idx);
        if self.seats.is_empty() {
            self.current_index = 0;
            self.round_started = false;
            self.phase = GamePhase::PreFlop;
        } else if idx <= self.current_index {
            self.current_index = self.current_index.saturating_sub(1);
        }
        true
    }

    // ---- round lifecycle --------------------------------------------------

    pub fn can_start_round(&self) -> bool {
        self.seats.len() >= 2 && (!self.round_started || self.phase == GamePhase::Showdown)
    }

    /// Starts a fresh round: new shuffled deck, pot and board cleared, every
    /// seat reset to Active, then two dealing passes so everyone holds their
    /// first card before anyone receives a second.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        if self.seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        if self.round_started && self.phase != GamePhase::Showdown {
            return Err(GameError::RoundInProgress);
        }
        self.round_started = true;
        self.round_number += 1;
        self.started_at = Some(Utc::now());
        let deck_seed = self.rng.next_u64();
        self.deck = Deck::new_with_seed(deck_seed);
        self.deck.shuffle();
        self.pot.reset();
        self.current_bet = 0;
        self.phase = GamePhase::PreFlop;
        self.community.clear();
        self.current_index = 0;
        for seat in &mut self.seats {
            seat.status.reset();
        }
        self.deal_hole_cards()?;
        info!(
            "round {} started with {} players",
            self.round_number,
            self.seats.len()
        );
        self.events.emit(&TableEvent::RoundStarted {
            round: self.round_number,
        });
        Ok(())
    }

    /// Advances one phase: PreFlop reveals the flop, Flop the turn, Turn the
    /// river — each reveal opens a new betting round — and River closes
    /// betting into Showdown. A no-op at Showdown.
    pub fn next_phase(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::PreFlop => {
                self.deal_community(3)?;
                self.phase = GamePhase::Flop;
                self.open_betting_round();
            }
            GamePhase::Flop => {
                self.deal_community(1)?;
                self.phase = GamePhase::Turn;
                self.open_betting_round();
            }
            GamePhase::Turn => {
                self.deal_community(1)?;
                self.phase = GamePhase::River;
                self.open_betting_round();
            }
            GamePhase::River => {
                self.phase = GamePhase::Showdown;
            }
            GamePhase::Showdown => {}
        }
        Ok(())
    }

    // ---- turn management --------------------------------------------------

    /// The seat holding the turn. When the stored pointer sits on a folded
    /// or all-in seat it silently advances to the next Active one; `None`
    /// when nobody can act.
    pub fn current_player(&mut self) -> Option<&Player> {
        if rules::active_count(&self.seats) == 0 {
            return None;
        }
        if self.current_index >= self.seats.len() {
            self.current_index = 0;
        }
        if self.seats[self.current_index].status.state == PlayerState::Active {
            return Some(&self.seats[self.current_index].player);
        }
        self.next_active_player()
    }

    /// Circular scan forward from the current pointer (exclusive) to the
    /// next Active seat, moving the pointer as a side effect.
    pub fn next_active_player(&mut self) -> Option<&Player> {
        let next = rules::next_active_from(&self.seats, self.current_index)?;
        self.current_index = next;
        Some(&self.seats[next].player)
    }

    pub fn is_betting_round_over(&self) -> bool {
        rules::betting_round_over(&self.seats, self.current_bet)
    }

    // ---- betting actions --------------------------------------------------

    /// Puts `amount` into the pot from the seat's stack and raises the table
    /// bet to at least the seat's total for this round.
    pub fn bet(&mut self, seat: SeatIndex, amount: Chips) -> Result<(), GameError> {
        if amount == 0 {
            return Err(GameError::InvalidBetAmount { amount });
        }
        if self.phase == GamePhase::Showdown {
            return Err(GameError::BettingClosed);
        }
        let idx = self.index_of_seat(seat)?;
        if self.seats[idx].status.state != PlayerState::Active {
            return Err(GameError::NotActive);
        }
        if self.seats[idx].player.chips() < amount {
            return Err(GameError::InsufficientChips);
        }
        self.ensure_turn(idx)?;
        {
            let s = &mut self.seats[idx];
            s.player.try_deduct(amount)?;
            s.status.current_bet += amount;
            s.status.has_acted = true;
        }
        self.pot.add_chips(amount);
        self.current_bet = self.current_bet.max(self.seats[idx].status.current_bet);
        self.advance_turn();
        self.auto_advance()
    }

    /// Matches the table bet. A stack that cannot cover the call goes in
    /// whole as an implicit all-in. Calling with nothing to match still
    /// counts as having acted.
    pub fn call(&mut self, seat: SeatIndex) -> Result<(), GameError> {
        let idx = self.index_of_seat(seat)?;
        if self.seats[idx].status.state != PlayerState::Active {
            return Err(GameError::NotActive);
        }
        self.ensure_turn(idx)?;
        let to_call = self
            .current_bet
            .saturating_sub(self.seats[idx].status.current_bet);
        let paid = {
            let s = &mut self.seats[idx];
            if s.player.chips() <= to_call {
                let stack = s.player.take_all();
                s.status.current_bet += stack;
                s.status.state = PlayerState::AllIn;
                s.status.has_acted = true;
                stack
            } else {
                s.player.try_deduct(to_call)?;
                s.status.current_bet += to_call;
                s.status.has_acted = true;
                to_call
            }
        };
        self.pot.add_chips(paid);
        self.advance_turn();
        self.auto_advance()
    }

    /// Calls the outstanding amount and adds `raise_amount` on top; the
    /// seat's new total becomes the table bet.
    pub fn raise(&mut self, seat: SeatIndex, raise_amount: Chips) -> Result<(), GameError> {
        let idx = self.index_of_seat(seat)?;
        if self.seats[idx].status.state != PlayerState::Active {
            return Err(GameError::NotActive);
        }
        self.ensure_turn(idx)?;
        let to_call = self
            .current_bet
            .saturating_sub(self.seats[idx].status.current_bet);
        let total = to_call.saturating_add(raise_amount);
        if self.seats[idx].player.chips() < total {
            return Err(GameError::InsufficientChips);
        }
        {
            let s = &mut self.seats[idx];
            s.player.try_deduct(total)?;
            s.status.current_bet += total;
            s.status.has_acted = true;
        }
        self.pot.add_chips(total);
        self.current_bet = self.seats[idx].status.current_bet;
        self.advance_turn();
        self.auto_advance()
    }

    /// Marks the seat as acted only when its bet already matches the table
    /// bet; an unmatched check changes nothing (and keeps the turn), which
    /// stalls round completion rather than corrupting state.
    pub fn check(&mut self, seat: SeatIndex) -> Result<(), GameError> {
        let idx = self.index_of_seat(seat)?;
        self.ensure_turn(idx)?;
        if self.seats[idx].status.current_bet == self.current_bet {
            self.seats[idx].status.has_acted = true;
            self.advance_turn();
        }
        self.auto_advance()
    }

    /// Folds the seat out of the round and discards its hole cards. A seat
    /// that is not Active folds as a no-op.
    pub fn fold(&mut self, seat: SeatIndex) -> Result<(), GameError> {
        let idx = self.index_of_seat(seat)?;
        if self.seats[idx].status.state != PlayerState::Active {
            return Ok(());
        }
        self.ensure_turn(idx)?;
        {
            let s = &mut self.seats[idx];
            s.status.state = PlayerState::Folded;
            s.status.has_acted = true;
            s.status.hand.clear();
        }
        self.advance_turn();
        self.auto_advance()
    }

    /// Commits the named player's entire stack.
    pub fn all_in(&mut self, name: &str) -> Result<(), GameError> {
        let idx = self
            .seats
            .iter()
            .position(|s| s.player.name() == name)
            .ok_or_else(|| GameError::PlayerNotFound {
                name: name.to_string(),
            })?;
        if self.seats[idx].status.state != PlayerState::Active {
            return Err(GameError::NotActive);
        }
        if self.seats[idx].player.chips() == 0 {
            return Err(GameError::InsufficientChips);
        }
        self.ensure_turn(idx)?;
        let stack = {
            let s = &mut self.seats[idx];
            let stack = s.player.take_all();
            s.status.current_bet += stack;
            s.status.state = PlayerState::AllIn;
            s.status.has_acted = true;
            stack
        };
        self.pot.add_chips(stack);
        self.current_bet = self.current_bet.max(self.seats[idx].status.current_bet);
        debug!("{name} is all-in for {stack}");
        self.advance_turn();
        self.auto_advance()
    }

    // ---- showdown ---------------------------------------------------------

    /// Resolves the round: every non-folded hand is scored over hole ∪
    /// community, the seats tied at the maximum strength split the pot by
    /// integer division (any remainder stays undistributed), and the table
    /// is cleaned up for the next round. `None` unless the phase is Showdown
    /// with at least one eligible hand.
    pub fn resolve_showdown(&mut self) -> Option<ShowdownResult> {
        if self.phase != GamePhase::Showdown {
            return None;
        }
        let mut scored: Vec<(usize, HandStrength)> = Vec::new();
        for (idx, seat) in self.seats.iter().enumerate() {
            if seat.status.state == PlayerState::Folded {
                continue;
            }
            let mut cards = seat.status.hand.clone();
            cards.extend_from_slice(&self.community);
            scored.push((idx, evaluate_hand(&cards)));
        }
        let best = scored.iter().map(|(_, hs)| hs.clone()).max()?;
        let winner_idx: Vec<usize> = scored
            .iter()
            .filter(|(_, hs)| *hs == best)
            .map(|(idx, _)| *idx)
            .collect();
        let share = self.pot.total() / winner_idx.len() as Chips;
        for &idx in &winner_idx {
            self.seats[idx].player.add_chips(share);
        }
        self.pot.reset();
        let winners: Vec<String> = winner_idx
            .iter()
            .map(|&idx| self.seats[idx].player.name().to_string())
            .collect();
        let result = ShowdownResult::new(winners, best.category);
        info!("showdown: {}", result.message);
        self.last_showdown = Some(result.clone());
        self.cleanup_after_round();
        self.round_started = false;
        self.phase = GamePhase::PreFlop;
        self.events.emit(&TableEvent::ShowdownCompleted {
            result: result.clone(),
        });
        Some(result)
    }

    // ---- queries ----------------------------------------------------------

    /// Coarse lifecycle summary for the transport layer.
    pub fn game_state(&self) -> &'static str {
        if self.seats.len() < 2 {
            "WaitingForPlayers"
        } else if self.phase == GamePhase::Showdown {
            "Completed"
        } else if self.round_started {
            "InProgress"
        } else {
            "WaitingForStartRound"
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pot_total(&self) -> Chips {
        self.pot.total()
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().map(|s| &s.player)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.seats
            .iter()
            .map(|s| &s.player)
            .find(|p| p.name() == name)
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn last_showdown(&self) -> Option<&ShowdownResult> {
        self.last_showdown.as_ref()
    }

    /// Per-seat snapshot safe to broadcast: hole cards appear only for the
    /// seat whose `viewer` name matches; other hands are never leaked.
    pub fn players_public_state(&self, viewer: Option<&str>) -> Vec<PlayerPublicState> {
        self.seats
            .iter()
            .map(|s| PlayerPublicState {
                seat: s.player.seat(),
                name: s.player.name().to_string(),
                chips: s.player.chips(),
                state: s.status.state,
                current_bet: s.status.current_bet,
                is_folded: s.status.state == PlayerState::Folded,
                hand: if viewer == Some(s.player.name()) {
                    s.status.hand.iter().map(|c| c.to_string()).collect()
                } else {
                    Vec::new()
                },
            })
            .collect()
    }

    /// What the named player can see of their own situation right now.
    pub fn player_view(&self, name: &str) -> Option<PlayerView> {
        let seat = self.seats.iter().find(|s| s.player.name() == name)?;
        let mut cards = seat.status.hand.clone();
        cards.extend_from_slice(&self.community);
        Some(PlayerView {
            name: seat.player.name().to_string(),
            seat: seat.player.seat(),
            hand: seat.status.hand.iter().map(|c| c.to_string()).collect(),
            community_cards: self.community.iter().map(|c| c.to_string()).collect(),
            rank: evaluate_hand(&cards).category,
        })
    }

    /// Full-reveal snapshot, meaningful only once the phase is Showdown
    /// (i.e. before `resolve_showdown` has cleaned the round up).
    pub fn showdown_details(&self) -> Option<ShowdownDetails> {
        if self.phase != GamePhase::Showdown {
            return None;
        }
        let mut players = Vec::new();
        let mut strengths: Vec<(String, HandStrength)> = Vec::new();
        for seat in &self.seats {
            if seat.status.state == PlayerState::Folded {
                continue;
            }
            let mut cards = seat.status.hand.clone();
            cards.extend_from_slice(&self.community);
            let hs = evaluate_hand(&cards);
            players.push(ShowdownPlayerDetail {
                name: seat.player.name().to_string(),
                seat: seat.player.seat(),
                hand: seat.status.hand.iter().map(|c| c.to_string()).collect(),
                rank: hs.category,
            });
            strengths.push((seat.player.name().to_string(), hs));
        }
        let best = strengths.iter().map(|(_, hs)| hs.clone()).max()?;
        let winners = strengths
            .iter()
            .filter(|(_, hs)| *hs == best)
            .map(|(name, _)| name.clone())
            .collect();
        Some(ShowdownDetails {
            community_cards: self.community.iter().map(|c| c.to_string()).collect(),
            players,
            winners,
        })
    }

    // ---- internals --------------------------------------------------------

    fn index_of_seat(&self, seat: SeatIndex) -> Result<usize, GameError> {
        self.seats
            .iter()
            .position(|s| s.player.seat() == seat)
            .ok_or(GameError::EmptySeat { seat })
    }

    /// Normalizes the turn pointer onto an Active seat, then requires the
    /// acting seat to hold it.
    fn ensure_turn(&mut self, idx: usize) -> Result<(), GameError> {
        if self.current_index >= self.seats.len() {
            self.current_index = 0;
        }
        if self.seats[self.current_index].status.state != PlayerState::Active {
            if let Some(next) = rules::next_active_from(&self.seats, self.current_index) {
                self.current_index = next;
            }
        }
        if self.current_index != idx {
            return Err(GameError::NotYourTurn {
                seat: self.seats[idx].player.seat(),
            });
        }
        Ok(())
    }

    fn advance_turn(&mut self) {
        if let Some(next) = rules::next_active_from(&self.seats, self.current_index) {
            self.current_index = next;
        }
    }

    /// Runs after every betting action, in order: a lone non-folded seat
    /// resolves at once; no Active seat left (or betting settled around a
    /// lone caller) deals the board out and resolves; a completed betting
    /// round advances a phase, resolving if that lands on Showdown.
    fn auto_advance(&mut self) -> Result<(), GameError> {
        if rules::live_count(&self.seats) <= 1 {
            self.phase = GamePhase::Showdown;
            self.resolve_showdown();
            return Ok(());
        }
        let actives = rules::active_count(&self.seats);
        let settled = self.is_betting_round_over();
        if actives == 0 || (actives <= 1 && settled) {
            self.deal_remaining_community()?;
            self.phase = GamePhase::Showdown;
            self.resolve_showdown();
            return Ok(());
        }
        if settled {
            self.next_phase()?;
            if self.phase == GamePhase::Showdown {
                self.resolve_showdown();
            }
        }
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        // two passes: card 1 for everyone, then card 2
        for _ in 0..2 {
            for seat in &mut self.seats {
                let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
                seat.status.hand.push(card);
            }
        }
        Ok(())
    }

    fn deal_community(&mut self, n: usize) -> Result<(), GameError> {
        for _ in 0..n {
            let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
            self.community.push(card);
        }
        debug!(
            "community cards: {}",
            self.community
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.events.emit(&TableEvent::CommunityCardsUpdated {
            cards: self.community.clone(),
        });
        Ok(())
    }

    /// Everything still owed to the board when betting ends early.
    fn deal_remaining_community(&mut self) -> Result<(), GameError> {
        if self.community.is_empty() {
            self.deal_community(3)?;
        }
        while self.community.len() < 5 {
            self.deal_community(1)?;
        }
        Ok(())
    }

    fn open_betting_round(&mut self) {
        // Active seats only: an all-in seat keeps its acted flag, so it can
        // never block completion of a later street.
        for seat in &mut self.seats {
            if seat.status.state == PlayerState::Active {
                seat.status.reset_for_betting_round();
            }
        }
        self.current_bet = 0;
        self.current_index = rules::first_active(&self.seats).unwrap_or(0);
    }

    fn cleanup_after_round(&mut self) {
        self.community.clear();
        for seat in &mut self.seats {
            seat.status.reset();
        }
        self.current_bet = 0;
        self.current_index = 0;
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
