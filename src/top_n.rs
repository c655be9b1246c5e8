use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::optimizer::{ScoredCombination, rank_order};

/// Keeps the `capacity` best combinations seen so far.
///
/// The result is the same as collecting everything, stable-sorting by score
/// and truncating: ties are ordered by index tuple, which is the enumeration
/// order.
#[derive(Debug)]
pub struct TopN {
    capacity: usize,
    heap: BinaryHeap<WorstFirst>,
}

impl TopN {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(1024) + 1),
        }
    }

    pub fn push(&mut self, candidate: ScoredCombination) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(WorstFirst(candidate));
            return;
        }
        if let Some(mut worst) = self.heap.peek_mut() {
            if rank_order(&candidate, &worst.0) == Ordering::Less {
                *worst = WorstFirst(candidate);
            }
        }
    }

    pub fn merge(&mut self, other: TopN) {
        other.heap.into_iter().for_each(|entry| self.push(entry.0));
    }

    /// Best first.
    pub fn into_sorted_vec(self) -> Vec<ScoredCombination> {
        // Ascending under WorstFirst is best first
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| entry.0)
            .collect()
    }
}

/// Orders entries so that the max-heap's top is the lowest ranked one.
#[derive(Debug)]
struct WorstFirst(ScoredCombination);

impl PartialEq for WorstFirst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WorstFirst {}

impl PartialOrd for WorstFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WorstFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(&self.0, &other.0)
    }
}
