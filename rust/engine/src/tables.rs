use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::table::Table;

/// Identifier the transport layer keys tables by.
pub type TableId = u32;

/// Owns every live table, one lock per table. Tables never share mutable
/// state; the `Mutex` is the critical section that serializes a table's
/// operations, and the `Arc` lets callers hold a handle across requests.
/// There is deliberately no ambient/global registry — callers own this
/// value.
#[derive(Default)]
pub struct TableRegistry {
    tables: HashMap<TableId, Arc<Mutex<Table>>>,
    next_id: TableId,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&mut self) -> TableId {
        self.insert(Table::new())
    }

    pub fn create_table_with_seed(&mut self, seed: u64) -> TableId {
        self.insert(Table::with_seed(seed))
    }

    fn insert(&mut self, table: Table) -> TableId {
        let id = self.next_id;
        self.next_id += 1;
        self.tables.insert(id, Arc::new(Mutex::new(table)));
        id
    }

    pub fn table(&self, id: TableId) -> Option<Arc<Mutex<Table>>> {
        self.tables.get(&id).cloned()
    }

    pub fn remove_table(&mut self, id: TableId) -> bool {
        self.tables.remove(&id).is_some()
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
