//! Nucleotide alphabet and base-pairing rules.
//!
//! Everything that needs to know what a base *is*: parsing (with DNA to RNA
//! conversion), and the Watson-Crick/wobble pairing predicate.

mod nucleotides;

pub use nucleotides::*;
