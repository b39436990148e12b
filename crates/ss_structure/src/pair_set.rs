//! Base pairs, and a hashed set of them for duplicate and membership checks.
//!
//! Indices are 0-based. A pair packs into a single `P1KEY`, which lets the
//! set use the identity hasher from `nohash_hasher`.

use std::fmt;
use nohash_hasher::IntSet;
use serde::Serialize;

use crate::NAIDX;
use crate::P1KEY;

/// A base pair (i, j) with i < j. Ordered by `i`, then `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pair {
    i: NAIDX,
    j: NAIDX,
}

impl Pair {
    pub fn new(i: NAIDX, j: NAIDX) -> Self {
        debug_assert!(i < j);
        Pair { i, j }
    }

    pub fn i(&self) -> NAIDX {
        self.i
    }

    pub fn j(&self) -> NAIDX {
        self.j
    }

    /// Distance between the two paired positions.
    pub fn span(&self) -> NAIDX {
        self.j - self.i
    }

    /// True if exactly one end of `other` lies strictly inside `self`.
    pub fn crosses(&self, other: &Pair) -> bool {
        let inside = |x: NAIDX| self.i < x && x < self.j;
        inside(other.i) != inside(other.j)
    }

    fn key(&self) -> P1KEY {
        ((self.i as P1KEY) << NAIDX::BITS) | self.j as P1KEY
    }

    fn unpack(key: P1KEY) -> Self {
        Pair::new((key >> NAIDX::BITS) as NAIDX, key as NAIDX)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.i, self.j)
    }
}

/// Pairs on a sequence of fixed length. Iteration order is not meaningful,
/// `to_vec` sorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet {
    length: usize,
    keys: IntSet<P1KEY>,
}

impl PairSet {
    pub fn new(length: usize) -> Self {
        Self { length, keys: IntSet::default() }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// False if the pair was already present.
    pub fn insert(&mut self, pair: Pair) -> bool {
        debug_assert!((pair.j as usize) < self.length);
        self.keys.insert(pair.key())
    }

    pub fn contains(&self, pair: &Pair) -> bool {
        self.keys.contains(&pair.key())
    }

    pub fn to_vec(&self) -> Vec<Pair> {
        let mut pairs: Vec<Pair> = self.keys.iter().map(|&k| Pair::unpack(k)).collect();
        pairs.sort_unstable();
        pairs
    }
}

impl fmt::Display for PairSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self.to_vec().iter().map(Pair::to_string).collect();
        write!(f, "{}", shown.join(","))
    }
}
