use thiserror::Error;

use crate::player::{Chips, SeatIndex};

/// Failure taxonomy for table operations. All of these are precondition
/// violations surfaced synchronously to the caller; the operation that
/// returned one has left the table unchanged. `DeckExhausted` is the lone
/// resource-exhaustion case and ends the round rather than the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("seat {seat} is already occupied")]
    SeatTaken { seat: SeatIndex },
    #[error("table is full (max {max} players)")]
    TableFull { max: usize },
    #[error("player {name:?} is already seated")]
    DuplicateName { name: String },
    #[error("seat {seat} is out of range (0..{max})")]
    InvalidSeat { seat: SeatIndex, max: usize },
    #[error("no player at seat {seat}")]
    EmptySeat { seat: SeatIndex },
    #[error("need at least 2 seated players to start a round")]
    NotEnoughPlayers,
    #[error("round already in progress")]
    RoundInProgress,
    #[error("invalid bet amount: {amount}")]
    InvalidBetAmount { amount: Chips },
    #[error("insufficient chips for action")]
    InsufficientChips,
    #[error("no betting allowed at showdown")]
    BettingClosed,
    #[error("player cannot act in current state")]
    NotActive,
    #[error("player {name:?} not found")]
    PlayerNotFound { name: String },
    #[error("it is not seat {seat}'s turn")]
    NotYourTurn { seat: SeatIndex },
    #[error("deck exhausted while dealing")]
    DeckExhausted,
}
