use std::fmt;
use std::error::Error;

use ss_sequence::SequenceError;
use ss_structure::Pair;
use ss_structure::PALETTE_SIZE;
use ss_structure::StructureError;

/// Malformed or out-of-contract constructor input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    PositiveEnergy(f64),
    InvalidEnergy(f64),
    Sequence(SequenceError),
    SequenceTooLong(usize),
    AmbiguousPairing,
    LengthMismatch { sequence: usize, structure: usize },
    Grammar(StructureError),
    SelfPair(usize),
    IndexOutOfRange { i: usize, j: usize, length: usize },
    IndexConflict(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositiveEnergy(e) =>
                write!(f, "Free energy must not be positive (got {e})"),
            Self::InvalidEnergy(e) =>
                write!(f, "Free energy must be a finite number (got {e})"),
            Self::Sequence(e) =>
                write!(f, "Invalid sequence: {e}"),
            Self::SequenceTooLong(n) =>
                write!(f, "Sequence of length {n} is too long"),
            Self::AmbiguousPairing =>
                write!(f, "Provide either a dot-bracket structure or a base pair list, not both"),
            Self::LengthMismatch { sequence, structure } =>
                write!(f, "Sequence length ({sequence}) and structure length ({structure}) do not match"),
            Self::Grammar(e) =>
                write!(f, "Malformed dot-bracket structure: {e}"),
            Self::SelfPair(i) =>
                write!(f, "Position {i} cannot pair with itself"),
            Self::IndexOutOfRange { i, j, length } =>
                write!(f, "Base pair ({i}, {j}) is out of range for length {length}"),
            Self::IndexConflict(i) =>
                write!(f, "Position {i} is used by more than one base pair"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sequence(e) => Some(e),
            Self::Grammar(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SequenceError> for ValidationError {
    fn from(e: SequenceError) -> Self { Self::Sequence(e) }
}

/// An invariant failed after canonicalization. This is a bug in the
/// pipeline, not in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    Unbalanced(StructureError),
    Codec(StructureError),
    IndexConflict(usize),
    IndexOutOfRange(usize, usize),
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbalanced(e) =>
                write!(f, "Canonical structure is not layer-balanced: {e}"),
            Self::Codec(e) =>
                write!(f, "Inconsistent pairing during canonicalization: {e}"),
            Self::IndexConflict(i) =>
                write!(f, "Position {i} appears in more than one pair after canonicalization"),
            Self::IndexOutOfRange(i, j) =>
                write!(f, "Pair ({i}, {j}) is out of range after canonicalization"),
        }
    }
}

impl Error for ConsistencyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unbalanced(e) | Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StructureError> for ConsistencyError {
    fn from(e: StructureError) -> Self {
        match e {
            StructureError::IndexConflict(i) => Self::IndexConflict(i),
            StructureError::InvalidPair(i, j) => Self::IndexOutOfRange(i, j),
            e => Self::Codec(e),
        }
    }
}

/// Everything that aborts the construction of a `Structure`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    Validation(ValidationError),
    Consistency(ConsistencyError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Consistency(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Consistency(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ModelError {
    fn from(e: ValidationError) -> Self { Self::Validation(e) }
}

impl From<ConsistencyError> for ModelError {
    fn from(e: ConsistencyError) -> Self { Self::Consistency(e) }
}

/// The pseudoknot palette ran out before all crossing pairs got a layer.
/// Construction still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyWarning {
    pub unresolved: Vec<Pair>,
}

impl fmt::Display for TopologyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "All {} pseudoknot bracket layers used, {} pairs left unresolved",
            PALETTE_SIZE, self.unresolved.len())
    }
}
