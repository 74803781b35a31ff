use serde::Serialize;

use crate::cards::Card;
use crate::showdown::ShowdownResult;

/// Outbound push-style notifications for the transport layer. Emitted
/// synchronously after the state mutation that caused them has completed;
/// listeners only ever see `&TableEvent`, so they cannot re-enter the
/// table's `&mut self` mutation path. Fire-and-forget: engine correctness
/// never depends on a listener running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableEvent {
    RoundStarted {
        round: u32,
    },
    /// Full community snapshot, sent once per reveal (flop batch, turn,
    /// river).
    CommunityCardsUpdated {
        cards: Vec<Card>,
    },
    ShowdownCompleted {
        result: ShowdownResult,
    },
}

pub type EventListener = Box<dyn Fn(&TableEvent) + Send + Sync>;

/// Listener registry, the explicit replacement for the original's multicast
/// delegates.
#[derive(Default)]
pub(crate) struct EventHub {
    listeners: Vec<EventListener>,
}

impl EventHub {
    pub(crate) fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&self, event: &TableEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}
