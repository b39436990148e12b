use std::ops::Deref;
use std::convert::TryFrom;

use crate::NAIDX;
use crate::Pair;
use crate::StructureError;
use crate::DotBracketVec;

/// Position -> partner lookup. Pairs from all bracket layers can live in
/// the same table, as long as no position is paired twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairTable(pub Vec<Option<NAIDX>>);

impl PairTable {
    /// Build a table of the given length, rejecting pairs that do not fit
    /// or that reuse a position.
    pub fn from_pairs(length: usize, pairs: &[Pair]) -> Result<Self, StructureError> {
        let mut table = vec![None; length];
        for p in pairs {
            let (i, j) = (p.i() as usize, p.j() as usize);
            if i >= j || j >= length {
                return Err(StructureError::InvalidPair(i, j));
            }
            if table[i].is_some() {
                return Err(StructureError::IndexConflict(i));
            }
            if table[j].is_some() {
                return Err(StructureError::IndexConflict(j));
            }
            table[i] = Some(p.j());
            table[j] = Some(p.i());
        }
        Ok(PairTable(table))
    }

    /// All pairs in ascending order of their 5'-side index.
    pub fn pairs(&self) -> Vec<Pair> {
        self.0.iter().enumerate()
            .filter_map(|(i, &partner)| match partner {
                Some(j) if j > i as NAIDX => Some(Pair::new(i as NAIDX, j)),
                _ => None,
            })
            .collect()
    }

    pub fn partner(&self, i: usize) -> Option<usize> {
        self.0.get(i).copied().flatten().map(|j| j as usize)
    }
}

impl Deref for PairTable {
    type Target = [Option<NAIDX>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<&DotBracketVec> for PairTable {
    type Error = StructureError;

    fn try_from(db: &DotBracketVec) -> Result<Self, Self::Error> {
        PairTable::from_pairs(db.len(), &db.decode()?)
    }
}

impl TryFrom<&str> for PairTable {
    type Error = StructureError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        PairTable::try_from(&DotBracketVec::try_from(s)?)
    }
}
