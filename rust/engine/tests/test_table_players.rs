use holdem_engine::errors::GameError;
use holdem_engine::table::{GamePhase, Table, MAX_SEATS};

#[test]
fn seating_errors_are_typed() {
    let mut table = Table::with_seed(1);
    table.add_player("alice", 1_000, 0).unwrap();

    assert_eq!(
        table.add_player("alice", 500, 1),
        Err(GameError::DuplicateName {
            name: "alice".to_string()
        })
    );
    assert_eq!(
        table.add_player("bob", 500, 0),
        Err(GameError::SeatTaken { seat: 0 })
    );
    assert_eq!(
        table.add_player("bob", 500, MAX_SEATS),
        Err(GameError::InvalidSeat {
            seat: MAX_SEATS,
            max: MAX_SEATS
        })
    );
    // failed joins left the table unchanged
    assert_eq!(table.player_count(), 1);
}

#[test]
fn eleventh_player_hits_table_full() {
    let mut table = Table::with_seed(1);
    for seat in 0..MAX_SEATS {
        table
            .add_player(&format!("p{seat}"), 1_000, seat)
            .unwrap();
    }
    assert_eq!(
        table.add_player("extra", 1_000, 0),
        Err(GameError::TableFull { max: MAX_SEATS })
    );
}

#[test]
fn remove_player_is_idempotent() {
    let mut table = Table::with_seed(1);
    table.add_player("alice", 1_000, 3).unwrap();
    assert!(table.remove_player("alice"));
    assert!(!table.remove_player("alice"));
    assert!(!table.remove_player("nobody"));
}

#[test]
fn removing_current_player_passes_the_turn() {
    let mut table = Table::with_seed(1);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.add_player("carol", 1_000, 2).unwrap();
    table.start_round().unwrap();
    assert_eq!(table.current_player().unwrap().name(), "alice");

    table.remove_player("alice");
    assert_eq!(table.current_player().unwrap().name(), "bob");
    assert_eq!(table.player_count(), 2);
}

#[test]
fn emptying_the_table_clears_the_round() {
    let mut table = Table::with_seed(1);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.start_round().unwrap();

    table.remove_player("alice");
    table.remove_player("bob");
    assert_eq!(table.player_count(), 0);
    assert_eq!(table.phase(), GamePhase::PreFlop);
    assert_eq!(table.game_state(), "WaitingForPlayers");
    assert!(!table.can_start_round());
}

#[test]
fn mid_round_join_below_the_pointer_keeps_the_turn() {
    let mut table = Table::with_seed(1);
    table.add_player("alice", 1_000, 2).unwrap();
    table.add_player("bob", 1_000, 4).unwrap();
    table.start_round().unwrap();
    table.bet(2, 50).unwrap();
    assert_eq!(table.current_player().unwrap().name(), "bob");

    // carol takes a lower seat while the round is running
    table.add_player("carol", 1_000, 0).unwrap();
    assert_eq!(table.current_player().unwrap().name(), "bob");
}

#[test]
fn seats_are_scanned_in_seat_order() {
    let mut table = Table::with_seed(1);
    // join order deliberately scrambled
    table.add_player("carol", 1_000, 5).unwrap();
    table.add_player("alice", 1_000, 1).unwrap();
    table.add_player("bob", 1_000, 3).unwrap();
    table.start_round().unwrap();

    assert_eq!(table.current_player().unwrap().name(), "alice");
    assert_eq!(table.next_active_player().unwrap().name(), "bob");
    assert_eq!(table.next_active_player().unwrap().name(), "carol");
    assert_eq!(table.next_active_player().unwrap().name(), "alice");
}
