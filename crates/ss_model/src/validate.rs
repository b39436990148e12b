//! Input gate for `Structure` construction.
//!
//! Checks run in a fixed order and the first failure is reported: energy,
//! sequence alphabet, ambiguity of the pairing input, lengths, dot-bracket
//! grammar and balance, and finally pair indices.

use ss_sequence::NucleotideVec;
use ss_structure::NAIDX;
use ss_structure::Pair;
use ss_structure::PairSet;
use ss_structure::DotBracketVec;

use crate::StructureConfig;
use crate::ValidationError;

/// The pairing description, in whichever form it was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    Unpaired,
    DotBracket(DotBracketVec),
    Pairs(Vec<Pair>),
}

/// Validated constructor input: an RNA sequence, a well-formed pairing
/// description and an admissible energy.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub sequence: NucleotideVec,
    pub pairing: Pairing,
    pub energy: f64,
}

pub fn validate_energy(energy: f64) -> Result<f64, ValidationError> {
    if !energy.is_finite() {
        Err(ValidationError::InvalidEnergy(energy))
    } else if energy > 0.0 {
        Err(ValidationError::PositiveEnergy(energy))
    } else {
        Ok(energy)
    }
}

/// Normalize a raw pair list: reversed tuples are swapped and exact
/// duplicates collapse. The result is sorted.
pub fn validate_pairs(
    raw: &[(usize, usize)],
    length: usize,
) -> Result<Vec<Pair>, ValidationError> {
    let mut seen = PairSet::new(length);
    let mut used = vec![false; length];
    for &(a, b) in raw {
        if a == b {
            return Err(ValidationError::SelfPair(a));
        }
        let (i, j) = (a.min(b), a.max(b));
        if j >= length {
            return Err(ValidationError::IndexOutOfRange { i, j, length });
        }
        if !seen.insert(Pair::new(i as NAIDX, j as NAIDX)) {
            continue;
        }
        for k in [i, j] {
            if used[k] {
                return Err(ValidationError::IndexConflict(k));
            }
            used[k] = true;
        }
    }
    Ok(seen.to_vec())
}

pub fn validate(config: &StructureConfig) -> Result<ValidatedInput, ValidationError> {
    let energy = validate_energy(config.energy)?;

    // Also the DNA -> RNA conversion.
    let sequence = NucleotideVec::try_from(config.sequence.as_str())?;
    let length = sequence.len();
    if length >= NAIDX::MAX as usize {
        return Err(ValidationError::SequenceTooLong(length));
    }

    let pairing = match (&config.structure, &config.basepairs) {
        (Some(_), Some(_)) => return Err(ValidationError::AmbiguousPairing),
        (Some(s), None) => {
            let structure = s.chars().count();
            if structure != length {
                return Err(ValidationError::LengthMismatch { sequence: length, structure });
            }
            let db = DotBracketVec::try_from(s.as_str()).map_err(ValidationError::Grammar)?;
            db.decode_layers().map_err(ValidationError::Grammar)?;
            Pairing::DotBracket(db)
        }
        (None, Some(raw)) => Pairing::Pairs(validate_pairs(raw, length)?),
        (None, None) => Pairing::Unpaired,
    };

    Ok(ValidatedInput { sequence, pairing, energy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_sequence::SequenceError;
    use ss_structure::StructureError;

    #[test]
    fn test_energy_gate() {
        assert_eq!(validate_energy(-3.5), Ok(-3.5));
        assert_eq!(validate_energy(0.0), Ok(0.0));
        assert_eq!(validate_energy(5.0), Err(ValidationError::PositiveEnergy(5.0)));
        assert!(matches!(validate_energy(f64::NAN), Err(ValidationError::InvalidEnergy(_))));
        assert!(matches!(validate_energy(f64::NEG_INFINITY), Err(ValidationError::InvalidEnergy(_))));
    }

    #[test]
    fn test_energy_checked_first() {
        let cfg = StructureConfig::new("GGGAAACCC")
            .with_structure("((")
            .with_energy(1.0);
        assert_eq!(validate(&cfg), Err(ValidationError::PositiveEnergy(1.0)));
    }

    #[test]
    fn test_dna_is_converted() {
        let input = validate(&StructureConfig::new("ggtt")).unwrap();
        assert_eq!(input.sequence.to_string(), "GGUU");
        assert_eq!(input.pairing, Pairing::Unpaired);
    }

    #[test]
    fn test_bad_sequence() {
        let err = validate(&StructureConfig::new("GGXA")).unwrap_err();
        assert_eq!(err, ValidationError::Sequence(SequenceError::InvalidChar('X', 2)));
    }

    #[test]
    fn test_length_mismatch() {
        let cfg = StructureConfig::new("GGGAAACCC").with_structure("(((..)))");
        assert_eq!(validate(&cfg), Err(ValidationError::LengthMismatch { sequence: 9, structure: 8 }));
    }

    #[test]
    fn test_grammar() {
        let cfg = StructureConfig::new("GGGAAACCC").with_structure("(((.x.)))");
        assert!(matches!(validate(&cfg),
            Err(ValidationError::Grammar(StructureError::InvalidToken(_, _, 4)))));

        let cfg = StructureConfig::new("GGGAAACCC").with_structure("((((..)))");
        assert_eq!(validate(&cfg),
            Err(ValidationError::Grammar(StructureError::UnmatchedOpen('(', 0))));
    }

    #[test]
    fn test_ambiguous() {
        let cfg = StructureConfig::new("GGGAAACCC")
            .with_structure("(((...)))")
            .with_basepairs(vec![(0, 8)]);
        assert_eq!(validate(&cfg), Err(ValidationError::AmbiguousPairing));
    }

    #[test]
    fn test_pairs() {
        let pairs = validate_pairs(&[(8, 0), (1, 7), (0, 8)], 9).unwrap();
        assert_eq!(pairs, vec![Pair::new(0, 8), Pair::new(1, 7)]);

        assert_eq!(validate_pairs(&[(3, 3)], 9), Err(ValidationError::SelfPair(3)));
        assert_eq!(validate_pairs(&[(0, 9)], 9),
            Err(ValidationError::IndexOutOfRange { i: 0, j: 9, length: 9 }));
        assert_eq!(validate_pairs(&[(0, 8), (2, 8)], 9), Err(ValidationError::IndexConflict(8)));
    }
}
