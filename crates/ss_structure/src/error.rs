use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    UnmatchedOpen(char, usize),            // opener at this position was never closed
    UnmatchedClose(char, usize),           // closer at this position has no matching opener
    InvalidToken(String, String, usize),   // token, source, position
    InvalidPair(usize, usize),             // pair does not fit the structure
    IndexConflict(usize),                  // position used by more than one pair
    PaletteExhausted(usize),               // requested number of bracket layers
    MalformedHelix(usize, usize),          // 5'-side and 3'-side lengths
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::UnmatchedOpen(c, i) => {
                write!(f, "Unmatched '{}' at position {}", c, i)
            }
            StructureError::UnmatchedClose(c, i) => {
                write!(f, "Unmatched '{}' at position {}", c, i)
            }
            StructureError::InvalidToken(tok, src, i) => {
                write!(f, "Invalid {} in {} at position {}", tok, src, i)
            }
            StructureError::InvalidPair(i, j) => {
                write!(f, "Invalid base pair ({}, {})", i, j)
            }
            StructureError::IndexConflict(i) => {
                write!(f, "Position {} is paired more than once", i)
            }
            StructureError::PaletteExhausted(n) => {
                write!(f, "Cannot represent {} bracket layers", n)
            }
            StructureError::MalformedHelix(a, b) => {
                write!(f, "Helix with {} 5'-side and {} 3'-side positions", a, b)
            }
        }
    }
}

impl std::error::Error for StructureError {}
