//! The bracket palette.
//!
//! Layer 0 is `()`, the nested base layer. Pseudoknots are drawn with the
//! remaining layers in a fixed order: `{}`, `<>`, then `Aa` to `Zz`
//! (uppercase opens, lowercase closes).

use std::fmt;
use serde::Serialize;

/// Total number of bracket layers, including the base layer.
pub const LAYER_COUNT: usize = 29;

/// Number of layers available for pseudoknots.
pub const PALETTE_SIZE: usize = LAYER_COUNT - 1;

/// Single-sided marker for a base whose pseudoknotted partner could not be
/// assigned a layer. It never balances.
pub const UNRESOLVED: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BracketLayer(u8);

impl BracketLayer {
    pub const ROUND: BracketLayer = BracketLayer(0);
    pub const CURLY: BracketLayer = BracketLayer(1);
    pub const ANGLE: BracketLayer = BracketLayer(2);

    pub fn new(index: usize) -> Option<Self> {
        (index < LAYER_COUNT).then_some(BracketLayer(index as u8))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn is_base(&self) -> bool {
        self.0 == 0
    }

    pub fn open(&self) -> char {
        match self.0 {
            0 => '(',
            1 => '{',
            2 => '<',
            k => (b'A' + (k - 3)) as char,
        }
    }

    pub fn close(&self) -> char {
        match self.0 {
            0 => ')',
            1 => '}',
            2 => '>',
            k => (b'a' + (k - 3)) as char,
        }
    }

    /// Look up a bracket character. Returns the layer and whether `c` opens it.
    pub fn from_char(c: char) -> Option<(BracketLayer, bool)> {
        match c {
            '(' => Some((BracketLayer(0), true)),
            ')' => Some((BracketLayer(0), false)),
            '{' => Some((BracketLayer(1), true)),
            '}' => Some((BracketLayer(1), false)),
            '<' => Some((BracketLayer(2), true)),
            '>' => Some((BracketLayer(2), false)),
            'A'..='Z' => Some((BracketLayer(c as u8 - b'A' + 3), true)),
            'a'..='z' => Some((BracketLayer(c as u8 - b'a' + 3), false)),
            _ => None,
        }
    }

    /// All layers, base layer first.
    pub fn all() -> impl Iterator<Item = BracketLayer> {
        (0..LAYER_COUNT as u8).map(BracketLayer)
    }

    /// The pseudoknot palette in assignment order.
    pub fn palette() -> impl Iterator<Item = BracketLayer> {
        Self::all().skip(1)
    }
}

impl fmt::Display for BracketLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open(), self.close())
    }
}
