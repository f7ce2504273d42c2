//! Radius-doubling rank refinement (Karp-Miller-Rosenberg).
//!
//! For radius `r`, `ranks[i] == k` when `text[i..i + r]` is the `k`-th
//! distinct `r`-symbol substring in lexicographic order. Tables are twice
//! the text length; the upper half holds [`PADDING`] so that `ranks[i + r]`
//! is always in bounds and sorts before any real substring.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::symbol::Symbol;

/// Rank of a substring running past the end of the text.
pub const PADDING: i64 = -1;

/// Ranks of the two halves of a `2r`-symbol substring, and where it starts.
///
/// The derived ordering compares `head`, then `tail`, then `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankedSuffix {
    pub head: i64,
    pub tail: i64,
    pub index: usize,
}

impl RankedSuffix {
    #[inline(always)]
    fn same_substring(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

/// Result of a full refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrays {
    pub suffix_array: Vec<usize>,
    pub rank_array: Vec<usize>,
}

/// Radius-1 table: raw symbol ordinals, then padding.
pub fn initial_ranks<S: Symbol>(text: &[S]) -> Vec<i64> {
    let mut ranks = Vec::with_capacity(text.len() * 2);
    ranks.extend(text.iter().map(|&c| c.ordinal() as i64));
    ranks.resize(text.len() * 2, PADDING);
    ranks
}

/// Pairs every position with the ranks at `i` and `i + radius`, sorted.
pub fn ranked_suffixes(ranks: &[i64], radius: usize, len: usize) -> Vec<RankedSuffix> {
    debug_assert!(radius <= len);
    debug_assert_eq!(ranks.len(), len * 2);

    let mut sorted: Vec<RankedSuffix> = (0..len)
        .map(|index| RankedSuffix {
            head: ranks[index],
            tail: ranks[index + radius],
            index,
        })
        .collect();

    // index is part of the key, so every sort lands on the same order
    #[cfg(feature = "parallel")]
    sorted.par_sort_unstable();
    #[cfg(not(feature = "parallel"))]
    sorted.sort_unstable();

    sorted
}

/// Scatters dense group numbers of `sorted` back into a fresh table.
///
/// Returns the table and the number of distinct groups.
pub fn regroup(sorted: &[RankedSuffix], len: usize) -> (Vec<i64>, usize) {
    let mut ranks = vec![PADDING; len * 2];

    let mut counter = 0_i64;
    let mut prev: Option<&RankedSuffix> = None;
    for entry in sorted {
        if let Some(prev) = prev {
            if !prev.same_substring(entry) {
                counter += 1;
            }
        }
        ranks[entry.index] = counter;
        prev = Some(entry);
    }

    let groups = if sorted.is_empty() {
        0
    } else {
        counter as usize + 1
    };
    (ranks, groups)
}

/// Turns the table for `radius` into the table for `2 * radius`.
pub fn double(ranks: &[i64], radius: usize, len: usize) -> (Vec<i64>, Vec<RankedSuffix>) {
    let sorted = ranked_suffixes(ranks, radius, len);
    let (next, groups) = regroup(&sorted, len);
    trace!(radius = radius * 2, groups, "refined ranks");
    (next, sorted)
}

/// Builds the suffix array and rank array of a normalized text.
///
/// At least one doubling step always runs, so a one-symbol text still gets
/// dense ranks.
pub fn suffix_sort<S: Symbol>(text: &[S]) -> Arrays {
    let len = text.len();
    if len == 0 {
        return Arrays {
            suffix_array: Vec::new(),
            rank_array: Vec::new(),
        };
    }

    let mut ranks = initial_ranks(text);
    let mut radius = 1;
    let sorted = loop {
        let (next, sorted) = double(&ranks, radius, len);
        ranks = next;
        radius *= 2;
        if radius >= len {
            break sorted;
        }
    };

    ranks.truncate(len);
    Arrays {
        suffix_array: sorted.into_iter().map(|s| s.index).collect(),
        rank_array: ranks.into_iter().map(|r| r as usize).collect(),
    }
}
