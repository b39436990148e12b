//! Separation of canonical (Watson-Crick and wobble) from non-canonical pairs.

use ss_sequence::NucleotideVec;
use ss_sequence::is_canonical_pair;
use ss_structure::Pair;
use ss_structure::StructureError;

use crate::Pairing;

/// Returns `(canonical, non_canonical)`, order preserved.
pub fn split_canonical(sequence: &NucleotideVec, pairs: &[Pair]) -> (Vec<Pair>, Vec<Pair>) {
    pairs.iter().partition(|p| is_canonical_pair(sequence, p.i() as usize, p.j() as usize))
}

/// Apply the non-canonical policy to a pairing description and report the
/// non-canonical pairs it contained. A dot-bracket input stays a
/// dot-bracket string; offending positions are blanked in place.
pub fn filter_canonical(
    sequence: &NucleotideVec,
    pairing: Pairing,
    allow_non_canonical: bool,
) -> Result<(Pairing, Vec<Pair>), StructureError> {
    match pairing {
        Pairing::Unpaired => Ok((Pairing::Unpaired, Vec::new())),
        Pairing::Pairs(pairs) => {
            let (canonical, non_canonical) = split_canonical(sequence, &pairs);
            let kept = if allow_non_canonical { pairs } else { canonical };
            Ok((Pairing::Pairs(kept), non_canonical))
        }
        Pairing::DotBracket(mut db) => {
            let (_, non_canonical) = split_canonical(sequence, &db.decode()?);
            if !allow_non_canonical {
                db.blank(&non_canonical);
            }
            Ok((Pairing::DotBracket(db), non_canonical))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_structure::DotBracketVec;

    #[test]
    fn test_split() {
        // G-C, A-A, G-U
        let seq = NucleotideVec::try_from("GAAGCAUA").unwrap();
        let pairs = vec![Pair::new(0, 4), Pair::new(1, 7), Pair::new(3, 6)];
        let (c, n) = split_canonical(&seq, &pairs);
        assert_eq!(c, vec![Pair::new(0, 4), Pair::new(3, 6)]);
        assert_eq!(n, vec![Pair::new(1, 7)]);
    }

    #[test]
    fn test_string_fast_path_matches_pair_path() {
        let seq = NucleotideVec::try_from("GGAAAACCC").unwrap();
        let db = DotBracketVec::try_from("(((...)))").unwrap();
        let pairs = db.decode().unwrap();

        let (by_string, n1) = filter_canonical(&seq, Pairing::DotBracket(db), false).unwrap();
        let (by_pairs, n2) = filter_canonical(&seq, Pairing::Pairs(pairs), false).unwrap();
        assert_eq!(n1, vec![Pair::new(2, 6)]);
        assert_eq!(n1, n2);

        let Pairing::DotBracket(db) = by_string else { panic!("expected a string") };
        let Pairing::Pairs(kept) = by_pairs else { panic!("expected pairs") };
        assert_eq!(db.to_string(), "((.....))");
        assert_eq!(db.decode().unwrap(), kept);
    }

    #[test]
    fn test_allow_non_canonical_keeps_everything() {
        let seq = NucleotideVec::try_from("GGAAAACCC").unwrap();
        let db = DotBracketVec::try_from("(((...)))").unwrap();
        let (kept, n) = filter_canonical(&seq, Pairing::DotBracket(db.clone()), true).unwrap();
        assert_eq!(kept, Pairing::DotBracket(db));
        assert_eq!(n.len(), 1);
    }
}
