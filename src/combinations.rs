use itertools::Itertools;
use std::ops::Range;

/// All `k`-element index tuples `i1 < i2 < ... < ik` drawn from `0..n`,
/// produced lazily in ascending lexicographic order. Cheap to copy, so the
/// enumeration can be restarted any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCombinations {
    n: usize,
    k: usize,
}

impl IndexCombinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, k }
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec<usize>> + use<> {
        (0..self.n).combinations(self.k)
    }

    /// First indices that start at least one combination. Each one owns a
    /// contiguous run of the full enumeration, in this order.
    pub fn partitions(&self) -> Range<usize> {
        if self.k == 0 || self.k > self.n {
            return 0..0;
        }
        0..self.n - self.k + 1
    }

    /// The run of combinations whose smallest index is `first`.
    pub fn starting_with(&self, first: usize) -> impl Iterator<Item = Vec<usize>> + use<> {
        let rest = self.k.saturating_sub(1);
        let tail_start = (first + 1).min(self.n);
        let valid = self.k > 0 && first < self.n;
        (tail_start..self.n)
            .combinations(rest)
            .filter(move |_| valid)
            .map(move |tail| {
                let mut combination = Vec::with_capacity(tail.len() + 1);
                combination.push(first);
                combination.extend(tail);
                combination
            })
    }

    /// `C(n, k)`, saturating at `u128::MAX`.
    pub fn count(&self) -> u128 {
        if self.k > self.n {
            return 0;
        }
        let k = self.k.min(self.n - self.k) as u128;
        let n = self.n as u128;
        (0..k).fold(1u128, |acc, i| {
            acc.checked_mul(n - i)
                .map(|v| v / (i + 1))
                .unwrap_or(u128::MAX)
        })
    }
}
