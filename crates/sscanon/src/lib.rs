//! # sscanon
//!
//! Validation and canonicalization of RNA secondary structures.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;

pub mod sequence {
    pub use ::ss_sequence::*;
}

pub mod structure {
    pub use ::ss_structure::*;
}

pub mod model {
    pub use ::ss_model::*;
}
