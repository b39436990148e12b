//! Grouping of base pairs into helices.
//!
//! A helix is a maximal run of pairs where each pair directly encloses the
//! next one. With `HelixSplit::Stack` only perfectly stacked pairs
//! `(i, j), (i+1, j-1)` continue a run. With `HelixSplit::Interior` a run
//! also continues across bulges and interior loops, i.e. whenever the inner
//! pair is the only pair directly enclosed by the outer one.

use std::fmt;
use std::str::FromStr;
use serde::Serialize;

use crate::NAIDX;
use crate::Pair;
use crate::PairTable;
use crate::BracketLayer;
use crate::DotBracketVec;
use crate::StructureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HelixSplit {
    #[default]
    Stack,
    Interior,
}

impl FromStr for HelixSplit {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stack" => Ok(HelixSplit::Stack),
            "interior" => Ok(HelixSplit::Interior),
            _ => Err(StructureError::InvalidToken(
                    format!("split mode '{}'", s), "helix grouping".into(), 0)),
        }
    }
}

impl fmt::Display for HelixSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelixSplit::Stack => write!(f, "stack"),
            HelixSplit::Interior => write!(f, "interior"),
        }
    }
}

/// Raw output of the grouping: positionally matched 5'- and 3'-side
/// indices, outermost pair first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelixRecord {
    pub layer: BracketLayer,
    pub five_prime: Vec<NAIDX>,
    pub three_prime: Vec<NAIDX>,
}

impl HelixRecord {
    pub fn len(&self) -> usize {
        self.five_prime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.five_prime.is_empty()
    }
}

/// The pair directly enclosed by `(i, j)`, if it continues the helix.
fn inner_partner(pt: &PairTable, outer: Pair, split: HelixSplit) -> Option<Pair> {
    let (i, j) = (outer.i() as usize, outer.j() as usize);

    let mut k = i + 1;
    while k < j && pt[k].is_none() {
        k += 1;
    }
    let l = pt.partner(k).filter(|&l| k < l && l < j)?;

    let mut m = j - 1;
    while m > l && pt[m].is_none() {
        m -= 1;
    }
    if m != l {
        return None;
    }
    match split {
        HelixSplit::Stack if k != i + 1 || l != j - 1 => None,
        _ => Some(Pair::new(k as NAIDX, l as NAIDX)),
    }
}

/// Group the pairs of one crossing-free layer into helices.
pub fn group_pairs(
    length: usize,
    pairs: &[Pair],
    layer: BracketLayer,
    split: HelixSplit,
) -> Result<Vec<HelixRecord>, StructureError> {
    let pt = PairTable::from_pairs(length, pairs)?;
    let mut seen = vec![false; length];
    let mut records = Vec::new();

    for outer in pt.pairs() {
        if seen[outer.i() as usize] {
            continue;
        }
        let mut record = HelixRecord {
            layer,
            five_prime: Vec::new(),
            three_prime: Vec::new(),
        };
        let mut current = Some(outer);
        while let Some(p) = current {
            seen[p.i() as usize] = true;
            record.five_prime.push(p.i());
            record.three_prime.push(p.j());
            current = inner_partner(&pt, p, split);
        }
        records.push(record);
    }
    Ok(records)
}

/// Group a layered dot-bracket string into `(nested, pseudoknotted)` helix
/// records. Each pseudoknot layer is grouped on its own.
pub fn group_into_helices(
    db: &DotBracketVec,
    split: HelixSplit,
) -> Result<(Vec<HelixRecord>, Vec<HelixRecord>), StructureError> {
    let layers = db.decode_layers()?;
    let mut nested = Vec::new();
    let mut knotted = Vec::new();
    for (layer, pairs) in BracketLayer::all().zip(&layers) {
        if pairs.is_empty() {
            continue;
        }
        let records = group_pairs(db.len(), pairs, layer, split)?;
        if layer.is_base() {
            nested = records;
        } else {
            knotted.extend(records);
        }
    }
    Ok((nested, knotted))
}
