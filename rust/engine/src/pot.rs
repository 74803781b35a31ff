use crate::player::Chips;

/// Single running pot. Mutation discipline is owned by the table state
/// machine; the pot itself only accumulates and resets.
///
/// Invariant maintained by the table: during a round the total equals the
/// sum of chips moved out of player stacks, and it returns to zero once
/// winnings are paid out.
#[derive(Debug, Default)]
pub struct Pot {
    total: Chips,
}

impl Pot {
    pub fn add_chips(&mut self, amount: Chips) {
        self.total = self.total.saturating_add(amount);
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }

    pub fn total(&self) -> Chips {
        self.total
    }
}
