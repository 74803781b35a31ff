use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Whole-chip amounts. Stacks, bets and the pot all use this.
pub type Chips = u32;

/// Position at the table, unique per player, in `0..MAX_SEATS`.
pub type SeatIndex = usize;

/// Lifecycle state of a seat within one round. `Folded` and `AllIn` persist
/// until the round resolves, then every seat returns to `Active`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Active,
    Folded,
    AllIn,
}

/// A seated player: identity plus chip stack. Owned by the table from join
/// to leave; all chip movement goes through the table's betting actions.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    chips: Chips,
    seat: SeatIndex,
}

impl Player {
    pub fn new(name: &str, chips: Chips, seat: SeatIndex) -> Self {
        Self {
            name: name.to_string(),
            chips,
            seat,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> Chips {
        self.chips
    }

    pub fn seat(&self) -> SeatIndex {
        self.seat
    }

    pub(crate) fn add_chips(&mut self, amount: Chips) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub(crate) fn try_deduct(&mut self, amount: Chips) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(GameError::InsufficientChips);
        }
        self.chips -= amount;
        Ok(())
    }

    /// Empties the stack, returning what was in it.
    pub(crate) fn take_all(&mut self) -> Chips {
        std::mem::take(&mut self.chips)
    }
}

/// Per-round mutable state attached to a player.
#[derive(Debug, Clone, Default)]
pub struct RoundStatus {
    /// Hole cards; 0 or 2. Cleared on fold so a folded hand can never leak.
    pub(crate) hand: Vec<Card>,
    pub(crate) state: PlayerState,
    /// Chips contributed during the current betting round.
    pub(crate) current_bet: Chips,
    pub(crate) has_acted: bool,
}

impl RoundStatus {
    /// Full reset between rounds: hand gone, bets zeroed, back to Active.
    pub(crate) fn reset(&mut self) {
        self.hand.clear();
        self.state = PlayerState::Active;
        self.current_bet = 0;
        self.has_acted = false;
    }

    /// Start-of-betting-round reset: bet and has-acted only. Lifecycle state
    /// is untouched, and the caller applies this to Active seats only — an
    /// all-in seat keeps its acted flag so it never blocks round completion.
    pub(crate) fn reset_for_betting_round(&mut self) {
        self.current_bet = 0;
        self.has_acted = false;
    }
}

/// One occupied seat: the player plus their per-round status. The table
/// keeps these sorted by seat index; betting predicates scan slices of them.
#[derive(Debug, Clone)]
pub struct Seat {
    pub(crate) player: Player,
    pub(crate) status: RoundStatus,
}

impl Seat {
    pub(crate) fn new(player: Player) -> Self {
        Self {
            player,
            status: RoundStatus::default(),
        }
    }
}
