use std::fmt;
use serde::Serialize;

use ss_structure::Pair;
use ss_structure::HelixRecord;
use ss_structure::BracketLayer;
use ss_structure::StructureError;

/// An immutable run of stacked base pairs, outermost pair first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Helix {
    layer: BracketLayer,
    pairs: Vec<Pair>,
}

impl TryFrom<&HelixRecord> for Helix {
    type Error = StructureError;

    fn try_from(record: &HelixRecord) -> Result<Self, Self::Error> {
        let (n5, n3) = (record.five_prime.len(), record.three_prime.len());
        if n5 != n3 || n5 == 0 {
            return Err(StructureError::MalformedHelix(n5, n3));
        }
        let mut pairs = Vec::with_capacity(n5);
        for (&i, &j) in record.five_prime.iter().zip(&record.three_prime) {
            if i >= j {
                return Err(StructureError::InvalidPair(i as usize, j as usize));
            }
            pairs.push(Pair::new(i, j));
        }
        Ok(Helix { layer: record.layer, pairs })
    }
}

impl Helix {
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Number of base pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn layer(&self) -> BracketLayer {
        self.layer
    }

    pub fn is_lonely(&self) -> bool {
        self.pairs.len() == 1
    }

    pub fn outer(&self) -> Pair {
        self.pairs[0]
    }

    pub fn inner(&self) -> Pair {
        self.pairs[self.pairs.len() - 1]
    }

    /// True if position `k` is paired within this helix.
    pub fn contains(&self, k: usize) -> bool {
        self.pairs.iter().any(|p| p.i() as usize == k || p.j() as usize == k)
    }
}

impl fmt::Display for Helix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (o, i) = (self.outer(), self.inner());
        write!(f, "{}-{}:{}-{}", o.i(), i.i(), i.j(), o.j())
    }
}
