//! Secondary structure representations and the algorithms that work
//! purely on pairings: the layered dot-bracket codec, maximum nested
//! subset extraction with pseudoknot layering, and helix grouping.

mod error;
mod layers;
mod pair_set;
mod pair_table;
mod dotbracket;
mod pseudoknots;
mod helices;

pub use error::*;
pub use layers::*;
pub use pair_set::*;
pub use pair_table::*;
pub use dotbracket::*;
pub use pseudoknots::*;
pub use helices::*;


/// Nucleic Acid INdeX: we use `u16` (0 to 65k), which is plenty for nucleic acids.
/// Should you ever want to annotate longer sequences, beware that `P1KEY` needs to
/// be *twice as large* (in bits) as `NAIDX`, since pairs `(NAIDX, NAIDX)` are
/// compacted into one `P1KEY`.
pub type NAIDX = u16;

/// Pair key. Must be >= 2×`NAIDX` in bit width so we can safely pack two indices.
pub type P1KEY = u32;

const _: () = {
    assert!(2 * NAIDX::BITS <= P1KEY::BITS);
};
