//! # holdem-engine: Texas Hold'em Table Engine
//!
//! The authoritative single-table game-state machine for Texas Hold'em:
//! shuffled deck, seated players, betting rounds, community-card reveal,
//! best-5-of-7 hand evaluation and pot distribution. Transport, persistence
//! and UI live elsewhere and talk to this crate through its in-process API
//! and outbound notifications.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG and monotonic draw
//! - [`table`] - The table state machine: seating, phases, betting, showdown
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Seated players and per-round status
//! - [`pot`] - Running pot total
//! - [`showdown`] - Immutable record of a resolved round
//! - [`events`] - Outbound notification hooks for a transport layer
//! - [`tables`] - Id-keyed registry, one lock per table
//! - [`errors`] - Error types for table operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::table::{GamePhase, Table};
//!
//! let mut table = Table::with_seed(7);
//! table.add_player("alice", 1_000, 0).unwrap();
//! table.add_player("bob", 1_000, 1).unwrap();
//!
//! table.start_round().unwrap();
//! assert_eq!(table.phase(), GamePhase::PreFlop);
//!
//! // alice opens, bob calls; the betting round completes and the flop comes
//! table.bet(0, 100).unwrap();
//! table.call(1).unwrap();
//! assert_eq!(table.phase(), GamePhase::Flop);
//! assert_eq!(table.community_cards().len(), 3);
//! assert_eq!(table.pot_total(), 200);
//! ```
//!
//! ## Hand Evaluation
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Hearts, rank: Rank::King },
//!     Card { suit: Suit::Hearts, rank: Rank::Queen },
//!     Card { suit: Suit::Hearts, rank: Rank::Jack },
//!     Card { suit: Suit::Hearts, rank: Rank::Ten },
//!     Card { suit: Suit::Clubs, rank: Rank::Two },
//!     Card { suit: Suit::Diamonds, rank: Rank::Three },
//! ];
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Notifications
//!
//! The table pushes [`events::TableEvent`] values to registered listeners
//! after each mutation completes — round started, community cards updated,
//! showdown completed. Listeners receive a shared reference and cannot
//! re-enter the mutation path; a transport layer fans them out to clients.

pub mod cards;
pub mod deck;
pub mod errors;
pub mod events;
pub mod hand;
pub mod player;
pub mod pot;
mod rules;
pub mod showdown;
pub mod table;
pub mod tables;
