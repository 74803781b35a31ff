use std::thread;

use holdem_engine::tables::TableRegistry;

#[test]
fn registry_lifecycle() {
    let mut registry = TableRegistry::new();
    assert!(registry.is_empty());

    let a = registry.create_table_with_seed(1);
    let b = registry.create_table_with_seed(2);
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.table_ids(), vec![a, b]);
    assert!(registry.table(a).is_some());

    assert!(registry.remove_table(a));
    assert!(!registry.remove_table(a));
    assert!(registry.table(a).is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn tables_do_not_share_state() {
    let mut registry = TableRegistry::new();
    let a = registry.create_table_with_seed(1);
    let b = registry.create_table_with_seed(2);

    {
        let handle = registry.table(a).unwrap();
        let mut table = handle.lock().unwrap();
        table.add_player("alice", 1_000, 0).unwrap();
        table.add_player("bob", 1_000, 1).unwrap();
        table.start_round().unwrap();
    }

    let handle = registry.table(b).unwrap();
    let table = handle.lock().unwrap();
    assert_eq!(table.player_count(), 0);
    assert_eq!(table.round_number(), 0);
}

#[test]
fn one_lock_per_table_supports_parallel_rounds() {
    let mut registry = TableRegistry::new();
    let ids: Vec<_> = (0..4).map(|i| registry.create_table_with_seed(i)).collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let table = registry.table(id).unwrap();
            thread::spawn(move || {
                let mut table = table.lock().unwrap();
                table.add_player("p1", 500, 0).unwrap();
                table.add_player("p2", 500, 1).unwrap();
                table.start_round().unwrap();
                table.fold(0).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for id in ids {
        let handle = registry.table(id).unwrap();
        let table = handle.lock().unwrap();
        let result = table.last_showdown().expect("round resolved");
        assert_eq!(result.winners, vec!["p2".to_string()]);
        assert_eq!(table.pot_total(), 0);
    }
}
