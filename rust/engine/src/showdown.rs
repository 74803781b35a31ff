use serde::Serialize;

use crate::hand::Category;

/// Immutable record of a resolved round: the winners (in seat order), the
/// winning hand category, and a human-readable summary. Created exactly once
/// per showdown and superseded, never mutated, by the next round's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowdownResult {
    pub winners: Vec<String>,
    pub rank: Category,
    pub message: String,
}

impl ShowdownResult {
    pub(crate) fn new(winners: Vec<String>, rank: Category) -> Self {
        let message = match winners.as_slice() {
            [single] => format!("{single} wins with {rank}"),
            many => format!("It's a tie between {} with {rank}", many.join(", ")),
        };
        Self {
            winners,
            rank,
            message,
        }
    }
}
