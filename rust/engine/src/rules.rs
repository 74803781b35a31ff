//! Pure betting-round predicates over the table's seats. No table state is
//! touched here; the state machine decides what to do with the answers.

use crate::player::{Chips, PlayerState, Seat};

/// Index of the first Active seat in seat order, scanning from index 0.
pub(crate) fn first_active(seats: &[Seat]) -> Option<usize> {
    seats
        .iter()
        .position(|s| s.status.state == PlayerState::Active)
}

/// Index of the next Active seat scanning circularly from `from`
/// (exclusive). `None` when nobody is Active.
pub(crate) fn next_active_from(seats: &[Seat], from: usize) -> Option<usize> {
    let n = seats.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&idx| seats[idx].status.state == PlayerState::Active)
}

/// A betting round is over once every non-folded seat has acted and, unless
/// all-in, has matched the table's current bet. Folded seats are excluded
/// from the check entirely; all-in seats are exempt from the bet match.
pub(crate) fn betting_round_over(seats: &[Seat], table_bet: Chips) -> bool {
    seats
        .iter()
        .filter(|s| s.status.state != PlayerState::Folded)
        .all(|s| {
            s.status.has_acted
                && (s.status.state == PlayerState::AllIn || s.status.current_bet == table_bet)
        })
}

/// Seats still contending for the pot (Active or AllIn).
pub(crate) fn live_count(seats: &[Seat]) -> usize {
    seats
        .iter()
        .filter(|s| s.status.state != PlayerState::Folded)
        .count()
}

/// Seats that can still take actions.
pub(crate) fn active_count(seats: &[Seat]) -> usize {
    seats
        .iter()
        .filter(|s| s.status.state == PlayerState::Active)
        .count()
}
