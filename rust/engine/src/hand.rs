use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// Hand category, ascending by strength. A royal flush is just the Ace-high
/// `StraightFlush`, not its own category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "HighCard",
            Category::Pair => "Pair",
            Category::TwoPair => "TwoPair",
            Category::ThreeOfAKind => "ThreeOfAKind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "FullHouse",
            Category::FourOfAKind => "FourOfAKind",
            Category::StraightFlush => "StraightFlush",
        };
        write!(f, "{name}")
    }
}

/// Comparable strength of an evaluated hand. The derived ordering compares
/// category first, then the kicker list lexicographically (highest first,
/// zero-padded); exact equality means a split pot.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl HandStrength {
    fn new(category: Category, kickers: &[u8]) -> Self {
        let mut ks = [0u8; 5];
        for (slot, &k) in ks.iter_mut().zip(kickers.iter()) {
            *slot = k;
        }
        Self {
            category,
            kickers: ks,
        }
    }
}

/// Scores the best 5-card poker hand contained in `cards` (normally the 5–7
/// of hole ∪ community). Pure: no table state involved.
///
/// Fewer than five cards can reach the evaluator when a round folds out
/// before the board is complete; such hands score as high card over whatever
/// ranks are present.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..=14 used
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards {
        let r = c.rank as u8;
        rank_counts[r as usize] += 1;
        by_suit[suit_index(c.suit)].push(r);
    }

    if cards.len() < 5 {
        return HandStrength::new(Category::HighCard, &ranks_desc_excluding(&rank_counts, &[], 5));
    }

    // Straight flush: a suit holds each rank at most once, so its bucket is
    // already distinct.
    for ranks in by_suit.iter_mut() {
        if ranks.len() >= 5 {
            ranks.sort_unstable();
            if let Some(high) = straight_high(ranks) {
                return HandStrength::new(Category::StraightFlush, &[high]);
            }
        }
    }

    let groups = rank_groups(&rank_counts);

    if let Some(&(4, quad)) = groups.first() {
        let mut ks = vec![quad];
        ks.extend(ranks_desc_excluding(&rank_counts, &[quad], 1));
        return HandStrength::new(Category::FourOfAKind, &ks);
    }

    if groups[0].0 == 3 {
        if let Some(&(_, pair)) = groups.iter().skip(1).find(|&&(count, _)| count >= 2) {
            return HandStrength::new(Category::FullHouse, &[groups[0].1, pair]);
        }
    }

    for ranks in by_suit.iter() {
        if ranks.len() >= 5 {
            // sorted ascending by the straight-flush pass above
            let ks: Vec<u8> = ranks.iter().rev().take(5).copied().collect();
            return HandStrength::new(Category::Flush, &ks);
        }
    }

    let distinct: Vec<u8> = (2..=14u8).filter(|&r| rank_counts[r as usize] > 0).collect();
    if let Some(high) = straight_high(&distinct) {
        return HandStrength::new(Category::Straight, &[high]);
    }

    if groups[0].0 == 3 {
        let mut ks = vec![groups[0].1];
        ks.extend(ranks_desc_excluding(&rank_counts, &[groups[0].1], 2));
        return HandStrength::new(Category::ThreeOfAKind, &ks);
    }

    let pairs: Vec<u8> = groups
        .iter()
        .filter(|&&(count, _)| count == 2)
        .map(|&(_, rank)| rank)
        .collect();
    if pairs.len() >= 2 {
        // Two highest pairs; the odd card of a third pair still competes for
        // the kicker slot.
        let mut ks = vec![pairs[0], pairs[1]];
        ks.extend(ranks_desc_excluding(&rank_counts, &[pairs[0], pairs[1]], 1));
        return HandStrength::new(Category::TwoPair, &ks);
    }
    if let Some(&pair) = pairs.first() {
        let mut ks = vec![pair];
        ks.extend(ranks_desc_excluding(&rank_counts, &[pair], 3));
        return HandStrength::new(Category::Pair, &ks);
    }

    HandStrength::new(Category::HighCard, &ranks_desc_excluding(&rank_counts, &[], 5))
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Present ranks grouped as (count, rank), sorted by count then rank, both
/// descending. The head group drives the category checks.
fn rank_groups(rank_counts: &[u8; 15]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}

/// Up to `n` card ranks, highest first with multiplicity, skipping the
/// excluded ranks entirely.
fn ranks_desc_excluding(rank_counts: &[u8; 15], exclude: &[u8], n: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(n);
    for r in (2..=14u8).rev() {
        if exclude.contains(&r) {
            continue;
        }
        for _ in 0..rank_counts[r as usize] {
            if out.len() == n {
                return out;
            }
            out.push(r);
        }
    }
    out
}

/// High card of the best straight within `distinct_asc` (distinct ranks,
/// ascending), or `None`. The Ace additionally counts low, so the wheel
/// scores Five-high. With six or more consecutive ranks the scan keeps the
/// highest 5-run, not the first one found.
fn straight_high(distinct_asc: &[u8]) -> Option<u8> {
    if distinct_asc.is_empty() {
        return None;
    }
    let mut v = Vec::with_capacity(distinct_asc.len() + 1);
    if distinct_asc.last() == Some(&14) {
        v.push(1);
    }
    v.extend_from_slice(distinct_asc);

    let mut run = 1u32;
    let mut best = None;
    for i in 1..v.len() {
        if v[i] == v[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best = Some(v[i]);
            }
        } else {
            run = 1;
        }
    }
    best
}
