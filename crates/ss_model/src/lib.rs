//! The secondary structure model.
//!
//! A `Structure` is built once from a `StructureConfig`. Construction
//! validates the input, drops chemically invalid pairs, separates
//! pseudoknots from the nested pairing (optionally drawing them on extra
//! bracket layers), and strips lonely pairs. Helices are computed lazily.

mod error;
mod config;
mod validate;
mod canonical;
mod helix;
mod structure;

pub use error::*;
pub use config::*;
pub use validate::*;
pub use canonical::*;
pub use helix::*;
pub use structure::*;
