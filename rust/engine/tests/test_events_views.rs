use std::sync::{Arc, Mutex};

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::events::TableEvent;
use holdem_engine::table::{GamePhase, Table};

fn recording_table(seed: u64) -> (Table, Arc<Mutex<Vec<TableEvent>>>) {
    let mut table = Table::with_seed(seed);
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    table.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    (table, log)
}

#[test]
fn card_wire_format_is_rank_of_suit() {
    let card = Card {
        suit: Suit::Spades,
        rank: Rank::Ace,
    };
    assert_eq!(card.to_string(), "Ace of Spades");
    let ten = Card {
        suit: Suit::Hearts,
        rank: Rank::Ten,
    };
    assert_eq!(ten.to_string(), "Ten of Hearts");
}

#[test]
fn a_full_round_emits_the_expected_events() {
    let (mut table, log) = recording_table(21);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.start_round().unwrap();
    for _ in 0..4 {
        table.check(0).unwrap();
        table.check(1).unwrap();
    }

    let events = log.lock().unwrap();
    assert!(matches!(events[0], TableEvent::RoundStarted { round: 1 }));
    let board_sizes: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            TableEvent::CommunityCardsUpdated { cards } => Some(cards.len()),
            _ => None,
        })
        .collect();
    assert_eq!(board_sizes, vec![3, 4, 5]);
    match events.last().unwrap() {
        TableEvent::ShowdownCompleted { result } => {
            assert_eq!(Some(result), table.last_showdown());
        }
        other => panic!("expected showdown completion, got {other:?}"),
    }
}

#[test]
fn all_in_runout_still_reveals_every_street() {
    let (mut table, log) = recording_table(22);
    table.add_player("alice", 300, 0).unwrap();
    table.add_player("bob", 300, 1).unwrap();
    table.start_round().unwrap();
    table.all_in("alice").unwrap();
    table.call(1).unwrap();

    let events = log.lock().unwrap();
    let board_sizes: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            TableEvent::CommunityCardsUpdated { cards } => Some(cards.len()),
            _ => None,
        })
        .collect();
    assert_eq!(board_sizes, vec![3, 4, 5]);
}

#[test]
fn second_round_bumps_the_round_counter() {
    let (mut table, log) = recording_table(23);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.start_round().unwrap();
    table.fold(0).unwrap();
    table.start_round().unwrap();

    let rounds: Vec<u32> = log
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            TableEvent::RoundStarted { round } => Some(*round),
            _ => None,
        })
        .collect();
    assert_eq!(rounds, vec![1, 2]);
}

#[test]
fn public_state_never_leaks_other_hands() {
    let mut table = Table::with_seed(24);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.start_round().unwrap();

    let for_alice = table.players_public_state(Some("alice"));
    let alice = for_alice.iter().find(|p| p.name == "alice").unwrap();
    let bob = for_alice.iter().find(|p| p.name == "bob").unwrap();
    assert_eq!(alice.hand.len(), 2);
    assert!(alice.hand.iter().all(|c| c.contains(" of ")));
    assert!(bob.hand.is_empty(), "bob's hole cards must stay hidden");

    // a spectator sees no hands at all
    assert!(table
        .players_public_state(None)
        .iter()
        .all(|p| p.hand.is_empty()));
}

#[test]
fn player_view_shows_own_cards_and_board() {
    let mut table = Table::with_seed(25);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.start_round().unwrap();
    table.check(0).unwrap();
    table.check(1).unwrap();
    assert_eq!(table.phase(), GamePhase::Flop);

    let view = table.player_view("alice").unwrap();
    assert_eq!(view.seat, 0);
    assert_eq!(view.hand.len(), 2);
    assert_eq!(view.community_cards.len(), 3);
    assert!(table.player_view("nobody").is_none());
}

#[test]
fn showdown_details_only_exist_at_showdown() {
    let mut table = Table::with_seed(26);
    table.add_player("alice", 1_000, 0).unwrap();
    table.add_player("bob", 1_000, 1).unwrap();
    table.add_player("carol", 1_000, 2).unwrap();
    table.start_round().unwrap();
    assert!(table.showdown_details().is_none());

    table.fold(0).unwrap();
    for _ in 0..3 {
        table.check(1).unwrap();
        table.check(2).unwrap();
    }
    assert_eq!(table.phase(), GamePhase::River);
    table.next_phase().unwrap();

    let details = table.showdown_details().expect("at showdown");
    assert_eq!(details.community_cards.len(), 5);
    // the folded player's hand stays out of the reveal
    assert_eq!(details.players.len(), 2);
    assert!(details.players.iter().all(|p| p.name != "alice"));
    assert!(details.players.iter().all(|p| p.hand.len() == 2));
    assert!(!details.winners.is_empty());
}

#[test]
fn events_serialize_for_the_wire() {
    let event = TableEvent::RoundStarted { round: 3 };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json, serde_json::json!({ "RoundStarted": { "round": 3 } }));

    let card = Card {
        suit: Suit::Clubs,
        rank: Rank::Queen,
    };
    let json = serde_json::to_value(card).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "suit": "Clubs", "rank": "Queen" })
    );
}
