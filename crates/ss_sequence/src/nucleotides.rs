use std::fmt;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    InvalidChar(char, usize),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidChar(c, i) => {
                write!(f, "Unsupported nucleotide '{}' at position {}", c, i)
            }
        }
    }
}

impl std::error::Error for SequenceError {}


/// RNA bases. DNA input is folded onto this alphabet (T -> U).
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Base { A, C, G, U, N }
pub const BCOUNT: usize = 5;

impl Base {
    /// Parse a single symbol, `i` is only used for error reporting.
    pub fn parse(c: char, i: usize) -> Result<Self, SequenceError> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'U' | 'T' => Ok(Base::U),
            'N' => Ok(Base::N),
            _ => Err(SequenceError::InvalidChar(c, i)),
        }
    }
}

impl From<Base> for char {
    fn from(b: Base) -> Self {
        match b {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::U => 'U',
            Base::N => 'N',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}


/// An RNA sequence. Construction through `TryFrom<&str>` doubles as the
/// DNA -> RNA conversion, since `T` is read as `U`.
#[derive(Clone, Hash, Debug, Eq, PartialEq, Default)]
pub struct NucleotideVec(pub Vec<Base>);

impl Deref for NucleotideVec {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<&str> for NucleotideVec {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            vec.push(Base::parse(c, i)?);
        }
        Ok(NucleotideVec(vec))
    }
}

impl fmt::Display for NucleotideVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

impl NucleotideVec {
    /// True if the bases at `i` and `j` form a Watson-Crick or wobble pair.
    /// Out-of-range positions never pair.
    pub fn can_pair(&self, i: usize, j: usize) -> bool {
        match (self.get(i), self.get(j)) {
            (Some(&a), Some(&b)) => CANONICAL[a as usize][b as usize],
            _ => false,
        }
    }
}

/// Convert a DNA (or mixed) sequence to its RNA spelling.
pub fn dna_to_rna(sequence: &str) -> Result<String, SequenceError> {
    NucleotideVec::try_from(sequence).map(|nv| nv.to_string())
}

/// True if every symbol belongs to the nucleic acid alphabet.
pub fn is_nucleic_acid(sequence: &str) -> bool {
    sequence.chars().enumerate().all(|(i, c)| Base::parse(c, i).is_ok())
}

/// Watson-Crick/wobble predicate on a sequence and two positions.
pub fn is_canonical_pair(sequence: &NucleotideVec, i: usize, j: usize) -> bool {
    sequence.can_pair(i, j)
}

/// A-U, C-G and G-U in both orientations. `N` pairs with nothing.
const CANONICAL: [[bool; BCOUNT]; BCOUNT] = {
    use Base::*;
    let mut table = [[false; BCOUNT]; BCOUNT];
    let pairs = [(A, U), (C, G), (G, U)];
    let mut k = 0;
    while k < pairs.len() {
        let (x, y) = pairs[k];
        table[x as usize][y as usize] = true;
        table[y as usize][x as usize] = true;
        k += 1;
    }
    table
};
