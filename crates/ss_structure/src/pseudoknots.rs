//! Pseudoknot removal and layering.
//!
//! `max_nested_subset` splits a pair list into a crossing-free part and the
//! pairs crossing it. Candidates are visited by ascending 5'-side index
//! (ties: ascending span) and accepted unless they cross a pair that was
//! accepted before. `assign_layers` repeats this on the leftovers, handing
//! out one bracket layer of the pseudoknot palette per round.

use log::debug;

use crate::NAIDX;
use crate::Pair;
use crate::StructureError;
use crate::BracketLayer;
use crate::DotBracketVec;

/// Returns `(nested, crossing)`. Both lists are sorted by (i, j).
/// Input pairs must not share positions.
pub fn max_nested_subset(pairs: &[Pair]) -> (Vec<Pair>, Vec<Pair>) {
    let mut candidates = pairs.to_vec();
    candidates.sort_unstable_by_key(|p| (p.i(), p.span()));

    let mut nested: Vec<Pair> = Vec::with_capacity(candidates.len());
    let mut crossing: Vec<Pair> = Vec::new();
    // Accepted pairs enclosing the current position, innermost on top.
    let mut open: Vec<NAIDX> = Vec::new();

    for p in candidates {
        while open.last().is_some_and(|&l| l < p.i()) {
            open.pop();
        }
        // Every enclosing accepted pair starts before p.i(), so p crosses
        // one of them iff the innermost closes before p.j().
        if open.last().is_some_and(|&l| l < p.j()) {
            crossing.push(p);
        } else {
            open.push(p.j());
            nested.push(p);
        }
    }
    nested.sort_unstable();
    crossing.sort_unstable();
    debug_assert!(crossing.iter().all(|c| nested.iter().any(|p| p.crosses(c))));
    (nested, crossing)
}

/// Split the pairs of a (possibly pseudoknotted) dot-bracket string into a
/// nested string on the round layer and the crossing pairs.
pub fn extract_non_nested(db: &DotBracketVec) -> Result<(DotBracketVec, Vec<Pair>), StructureError> {
    let (nested, crossing) = max_nested_subset(&db.decode()?);
    Ok((DotBracketVec::encode(&nested, db.len())?, crossing))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerStatus {
    Resolved,
    /// The palette ran out; these pairs have no layer.
    PartiallyResolved(Vec<Pair>),
}

/// Pseudoknot layers in palette order: `layers[0]` uses `{}`, `layers[1]`
/// uses `<>`, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerAssignment {
    pub layers: Vec<Vec<Pair>>,
    pub status: LayerStatus,
}

impl LayerAssignment {
    pub fn unresolved(&self) -> &[Pair] {
        match &self.status {
            LayerStatus::Resolved => &[],
            LayerStatus::PartiallyResolved(rest) => rest,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == LayerStatus::Resolved
    }
}

/// Distribute crossing pairs over the pseudoknot palette.
pub fn assign_layers(crossing: &[Pair]) -> LayerAssignment {
    let mut layers = Vec::new();
    let mut remaining = crossing.to_vec();

    for layer in BracketLayer::palette() {
        if remaining.is_empty() {
            break;
        }
        let (nested, leftover) = max_nested_subset(&remaining);
        debug!("Layer {} takes {} pairs, {} left.", layer, nested.len(), leftover.len());
        layers.push(nested);
        remaining = leftover;
    }

    let status = if remaining.is_empty() {
        LayerStatus::Resolved
    } else {
        LayerStatus::PartiallyResolved(remaining)
    };
    LayerAssignment { layers, status }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(v: &[(NAIDX, NAIDX)]) -> Vec<Pair> {
        v.iter().map(|&(i, j)| Pair::new(i, j)).collect()
    }

    #[test]
    fn test_lower_start_index_wins() {
        let (nested, crossing) = max_nested_subset(&pairs(&[(2, 6), (0, 4)]));
        assert_eq!(nested, pairs(&[(0, 4)]));
        assert_eq!(crossing, pairs(&[(2, 6)]));
    }

    #[test]
    fn test_nested_input_is_kept() {
        let input = pairs(&[(0, 8), (1, 7), (2, 6), (10, 14)]);
        let (nested, crossing) = max_nested_subset(&input);
        assert_eq!(nested, input);
        assert!(crossing.is_empty());
    }

    #[test]
    fn test_greedy_against_accepted_only() {
        // (1,5) crosses (0,3) and is rejected; (4,8) then only has to be
        // checked against (0,3), which it does not cross.
        let input = pairs(&[(0, 3), (1, 5), (4, 8)]);
        let (nested, crossing) = max_nested_subset(&input);
        assert_eq!(nested, pairs(&[(0, 3), (4, 8)]));
        assert_eq!(crossing, pairs(&[(1, 5)]));
    }

    #[test]
    fn test_kissing_hairpins() {
        let db = DotBracketVec::try_from("((..{{..))..((..}}..))").unwrap();
        let (nested, crossing) = extract_non_nested(&db).unwrap();
        assert_eq!(nested.to_string(), "((......))..((......))");
        assert_eq!(crossing, pairs(&[(4, 17), (5, 16)]));
    }

    #[test]
    fn test_idempotent() {
        let input = pairs(&[(0, 10), (2, 12), (4, 14), (6, 16), (1, 3)]);
        let (nested, _) = max_nested_subset(&input);
        let (again, crossing) = max_nested_subset(&nested);
        assert_eq!(again, nested);
        assert!(crossing.is_empty());
    }

    #[test]
    fn test_assign_layers() {
        // Three mutually crossing pairs need two pseudoknot layers.
        let (nested, crossing) = max_nested_subset(&pairs(&[(0, 4), (2, 6), (3, 8)]));
        assert_eq!(nested, pairs(&[(0, 4)]));
        let la = assign_layers(&crossing);
        assert!(la.is_resolved());
        assert_eq!(la.layers, vec![pairs(&[(2, 6)]), pairs(&[(3, 8)])]);
    }

    #[test]
    fn test_assign_layers_empty() {
        let la = assign_layers(&[]);
        assert!(la.layers.is_empty());
        assert!(la.unresolved().is_empty());
    }

    #[test]
    fn test_palette_exhaustion() {
        // 31 pairs that all cross each other: (k, k+31).
        let input: Vec<Pair> = (0..31).map(|k| Pair::new(k, k + 31)).collect();
        let (nested, crossing) = max_nested_subset(&input);
        assert_eq!(nested.len(), 1);
        let la = assign_layers(&crossing);
        assert_eq!(la.layers.len(), 28);
        assert_eq!(la.unresolved(), &pairs(&[(29, 60), (30, 61)])[..]);
        for layer in &la.layers {
            assert_eq!(layer.len(), 1);
        }
    }
}
