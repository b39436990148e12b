//! The `Structure` facade.
//!
//! Pairs are the ground truth. The dot-bracket string is rendered from
//! them once, after all canonicalization stages have run:
//!
//!  1) validation (incl. DNA -> RNA),
//!  2) non-canonical pair filter,
//!  3) maximum nested subset and pseudoknot layering,
//!  4) layer-balance check,
//!  5) lonely pair stripping.
//!

use std::fmt;
use log::{debug, error, warn};
use colored::*;
use once_cell::unsync::OnceCell;
use serde::Serialize;

use ss_sequence::NucleotideVec;
use ss_structure::NAIDX;
use ss_structure::Pair;
use ss_structure::PairSet;
use ss_structure::PairTable;
use ss_structure::HelixSplit;
use ss_structure::HelixRecord;
use ss_structure::DotBracketVec;
use ss_structure::StructureError;
use ss_structure::assign_layers;
use ss_structure::extract_non_nested;
use ss_structure::max_nested_subset;
use ss_structure::group_into_helices;

use crate::Helix;
use crate::Pairing;
use crate::ModelError;
use crate::StructureConfig;
use crate::TopologyWarning;
use crate::ConsistencyError;
use crate::validate;
use crate::validate_energy;
use crate::filter_canonical;

type HelixCache = (Vec<Helix>, Vec<Helix>);

/// A validated, canonical secondary structure.
///
/// Pairing topology is fixed at construction; only the energy can change.
/// The helix cache uses unsynchronized interior mutability, so a
/// `Structure` can be sent to another thread but not shared between them.
#[derive(Debug, Clone)]
pub struct Structure {
    sequence: NucleotideVec,
    basepairs: Vec<Pair>,
    pkpairs: Vec<Pair>,
    pk_layers: Vec<Vec<Pair>>,
    unresolved: Vec<Pair>,
    non_canonical: Vec<Pair>,
    lonely: Vec<Pair>,
    energy: f64,
    allow_pseudoknots: bool,
    allow_non_canonical: bool,
    allow_lonely_pairs: bool,
    helix_split: HelixSplit,
    dotbracket: DotBracketVec,
    rendered: String,
    warnings: Vec<TopologyWarning>,
    helices: OnceCell<HelixCache>,
}

/// A serializable snapshot of a `Structure`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureSummary {
    pub sequence: String,
    pub structure: String,
    pub energy: f64,
    pub basepairs: Vec<Pair>,
    pub pkpairs: Vec<Pair>,
    pub non_canonical_pairs: Vec<Pair>,
    pub lonely_pairs: Vec<Pair>,
    pub helices: Vec<Helix>,
    pub pk_helices: Vec<Helix>,
    pub warnings: Vec<String>,
}

fn helices_from_records(records: &[HelixRecord]) -> Result<Vec<Helix>, StructureError> {
    records.iter().map(Helix::try_from).collect()
}

fn decompose(db: &DotBracketVec, split: HelixSplit) -> Result<HelixCache, StructureError> {
    let (nested, knotted) = group_into_helices(db, split)?;
    Ok((helices_from_records(&nested)?, helices_from_records(&knotted)?))
}

impl TryFrom<StructureConfig> for Structure {
    type Error = ModelError;

    fn try_from(config: StructureConfig) -> Result<Self, Self::Error> {
        Structure::new(&config)
    }
}

impl Structure {
    pub fn new(config: &StructureConfig) -> Result<Self, ModelError> {
        let input = validate(config)?;
        let sequence = input.sequence;
        let length = sequence.len();

        let (working, non_canonical) = filter_canonical(
            &sequence, input.pairing, config.allow_non_canonical)
            .map_err(ConsistencyError::from)?;
        if !non_canonical.is_empty() {
            debug!("{} non-canonical pairs ({}).", non_canonical.len(),
                if config.allow_non_canonical { "kept" } else { "removed" });
        }

        let (basepairs, pkpairs) = match working {
            Pairing::Unpaired => (Vec::new(), Vec::new()),
            Pairing::Pairs(pairs) => max_nested_subset(&pairs),
            Pairing::DotBracket(db) => {
                let (nested, crossing) = extract_non_nested(&db)
                    .map_err(ConsistencyError::from)?;
                (nested.decode().map_err(ConsistencyError::from)?, crossing)
            }
        };

        let mut warnings = Vec::new();
        let (pk_layers, unresolved) = if config.allow_pseudoknots {
            let assignment = assign_layers(&pkpairs);
            let unresolved = assignment.unresolved().to_vec();
            if !assignment.is_resolved() {
                let w = TopologyWarning { unresolved: unresolved.clone() };
                warn!("{} {}", "WARNING:".red(), w);
                warnings.push(w);
            }
            (assignment.layers, unresolved)
        } else {
            (Vec::new(), Vec::new())
        };
        debug!("{} nested pairs, {} pseudoknotted pairs on {} layers.",
            basepairs.len(), pkpairs.len(), pk_layers.len());

        let mut structure = Structure {
            sequence,
            basepairs,
            pkpairs,
            pk_layers,
            unresolved,
            non_canonical,
            lonely: Vec::new(),
            energy: input.energy,
            allow_pseudoknots: config.allow_pseudoknots,
            allow_non_canonical: config.allow_non_canonical,
            allow_lonely_pairs: config.allow_lonely_pairs,
            helix_split: config.helix_split,
            dotbracket: DotBracketVec::unpaired(length),
            rendered: String::new(),
            warnings,
            helices: OnceCell::new(),
        };
        structure.render()?;
        structure.check_invariants()?;

        if !structure.allow_lonely_pairs {
            structure.strip_lonely_pairs()?;
        }
        Ok(structure)
    }

    /// Encode all layers into the dot-bracket string and verify that every
    /// layer balances.
    fn render(&mut self) -> Result<(), ConsistencyError> {
        let mut layers = Vec::with_capacity(1 + self.pk_layers.len());
        layers.push(self.basepairs.clone());
        layers.extend(self.pk_layers.iter().cloned());

        let db = DotBracketVec::encode_layers(self.len(), &layers, &self.unresolved)?;
        db.decode_layers().map_err(ConsistencyError::Unbalanced)?;
        self.rendered = db.to_string();
        self.dotbracket = db;
        Ok(())
    }

    /// Every index in range, and used at most once across basepairs and
    /// pkpairs.
    fn check_invariants(&self) -> Result<(), ConsistencyError> {
        let all: Vec<Pair> = self.basepairs.iter()
            .chain(&self.pkpairs)
            .copied()
            .collect();
        PairTable::from_pairs(self.len(), &all)?;
        Ok(())
    }

    fn strip_lonely_pairs(&mut self) -> Result<(), ConsistencyError> {
        let (nested, knotted) = group_into_helices(&self.dotbracket, self.helix_split)?;

        let mut lonely = PairSet::new(self.len());
        for record in nested.iter().chain(&knotted).filter(|r| r.len() == 1) {
            lonely.insert(Pair::new(record.five_prime[0], record.three_prime[0]));
        }
        if lonely.is_empty() {
            let cache = (helices_from_records(&nested)?, helices_from_records(&knotted)?);
            let _ = self.helices.set(cache);
            return Ok(());
        }
        debug!("Stripping {} lonely pairs: {}", lonely.len(), lonely);

        self.basepairs.retain(|p| !lonely.contains(p));
        // `pkpairs` keeps every crossing pair; only the drawn layers shrink.
        for layer in self.pk_layers.iter_mut() {
            layer.retain(|p| !lonely.contains(p));
        }
        self.lonely = lonely.to_vec();
        self.dotbracket.blank(&self.lonely);
        self.rendered = self.dotbracket.to_string();

        // Removing a pair can merge its neighbors under interior splitting.
        let cache = decompose(&self.dotbracket, self.helix_split)?;
        let _ = self.helices.set(cache);
        Ok(())
    }

    fn helix_cache(&self, split: Option<HelixSplit>) -> &HelixCache {
        self.helices.get_or_init(|| {
            let split = split.unwrap_or(self.helix_split);
            // `render` already decoded every layer and `check_invariants`
            // rejected shared positions, so grouping cannot fail here.
            decompose(&self.dotbracket, split).unwrap_or_else(|e| {
                debug_assert!(false, "helix decomposition failed: {e}");
                error!("Helix decomposition of a canonical structure failed: {}", e);
                (Vec::new(), Vec::new())
            })
        })
    }

    /// Nested helices. The first call (or construction, when lonely pairs
    /// are stripped) fixes the split mode for all later calls.
    pub fn helices(&self, split: Option<HelixSplit>) -> &[Helix] {
        &self.helix_cache(split).0
    }

    /// Helices on the pseudoknot layers; shares the cache with `helices`.
    pub fn pk_helices(&self) -> &[Helix] {
        &self.helix_cache(None).1
    }

    pub fn sequence(&self) -> &NucleotideVec {
        &self.sequence
    }

    /// The canonical dot-bracket annotation.
    pub fn structure(&self) -> &str {
        &self.rendered
    }

    /// Crossing-free pairs, sorted.
    pub fn basepairs(&self) -> &[Pair] {
        &self.basepairs
    }

    /// Pairs that crossed the nested pairing, whether or not pseudoknots
    /// are drawn in the structure. Lonely pseudoknot pairs removed from the
    /// drawing are still listed here.
    pub fn pkpairs(&self) -> &[Pair] {
        &self.pkpairs
    }

    /// Pseudoknot pairs per bracket layer, starting with `{}`.
    pub fn pk_layers(&self) -> &[Vec<Pair>] {
        &self.pk_layers
    }

    /// Pseudoknot pairs that did not fit into the bracket palette.
    pub fn unresolved_pairs(&self) -> &[Pair] {
        &self.unresolved
    }

    /// Non-canonical pairs of the input (removed unless allowed).
    pub fn non_canonical_pairs(&self) -> &[Pair] {
        &self.non_canonical
    }

    pub fn lonely_pairs(&self) -> &[Pair] {
        &self.lonely
    }

    pub fn warnings(&self) -> &[TopologyWarning] {
        &self.warnings
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Accepts finite values `<= 0`. Anything else leaves the energy
    /// unchanged and is not an error.
    pub fn set_energy(&mut self, energy: f64) {
        match validate_energy(energy) {
            Ok(e) => self.energy = e,
            Err(e) => debug!("Ignoring energy update: {}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn allows_pseudoknots(&self) -> bool {
        self.allow_pseudoknots
    }

    pub fn allows_non_canonical(&self) -> bool {
        self.allow_non_canonical
    }

    pub fn allows_lonely_pairs(&self) -> bool {
        self.allow_lonely_pairs
    }

    /// The nested pairs as a position -> partner table.
    pub fn pair_table(&self) -> PairTable {
        let mut table: Vec<Option<NAIDX>> = vec![None; self.len()];
        for p in &self.basepairs {
            table[p.i() as usize] = Some(p.j());
            table[p.j() as usize] = Some(p.i());
        }
        PairTable(table)
    }

    pub fn summary(&self) -> StructureSummary {
        StructureSummary {
            sequence: self.sequence.to_string(),
            structure: self.rendered.clone(),
            energy: self.energy,
            basepairs: self.basepairs.clone(),
            pkpairs: self.pkpairs.clone(),
            non_canonical_pairs: self.non_canonical.clone(),
            lonely_pairs: self.lonely.clone(),
            helices: self.helices(None).to_vec(),
            pk_helices: self.pk_helices().to_vec(),
            warnings: self.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{} {:>6.2}", self.sequence, self.rendered, self.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_chain() {
        let s = Structure::new(&StructureConfig::new("ACGUACGU")).unwrap();
        assert_eq!(s.structure(), "........");
        assert!(s.basepairs().is_empty());
        assert!(s.helices(None).is_empty());
        assert!(s.pk_helices().is_empty());
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn test_empty_sequence() {
        let s = Structure::new(&StructureConfig::default()).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.structure(), "");
    }

    #[test]
    fn test_set_energy() {
        let mut s = Structure::new(&StructureConfig::new("GGGAAACCC").with_energy(-1.0)).unwrap();
        s.set_energy(1.0);
        assert_eq!(s.energy(), -1.0);
        s.set_energy(f64::NAN);
        assert_eq!(s.energy(), -1.0);
        s.set_energy(-3.5);
        assert_eq!(s.energy(), -3.5);
    }

    #[test]
    fn test_pair_table() {
        let cfg = StructureConfig::new("GGGAAACCC").with_structure("(((...)))");
        let s = Structure::new(&cfg).unwrap();
        let pt = s.pair_table();
        assert_eq!(pt.partner(0), Some(8));
        assert_eq!(pt.partner(4), None);
        assert_eq!(pt.pairs(), s.basepairs());
    }

    #[test]
    fn test_display() {
        let cfg = StructureConfig::new("GGGAAACCC")
            .with_structure("(((...)))")
            .with_energy(-1.2);
        let s = Structure::try_from(cfg).unwrap();
        assert_eq!(format!("{}", s), "GGGAAACCC\n(((...)))  -1.20");
    }

    #[test]
    fn test_interior_split_cache() {
        // Bulged hairpin: one helix with interior splitting, two without.
        let cfg = StructureConfig::new("GGAGGAAACCCC")
            .with_structure("((.((...))))")
            .with_helix_split(HelixSplit::Interior);
        let s = Structure::new(&cfg).unwrap();
        assert_eq!(s.helices(None).len(), 1);
        assert_eq!(s.helices(None)[0].len(), 4);

        let cfg = StructureConfig::new("GGAGGAAACCCC")
            .with_structure("((.((...))))")
            .with_lonely_pairs(true);
        let s = Structure::new(&cfg).unwrap();
        assert_eq!(s.helices(Some(HelixSplit::Stack)).len(), 2);
        // First call decided the mode.
        assert_eq!(s.helices(Some(HelixSplit::Interior)).len(), 2);
    }

    #[test]
    fn test_lazy_helices_match_grouping() {
        let cfg = StructureConfig::new("GGAAGGAACCAAGGAACCAACC")
            .with_structure("((..{{..))..((..}}..))")
            .with_pseudoknots(true)
            .with_lonely_pairs(true);
        for split in [HelixSplit::Stack, HelixSplit::Interior] {
            let s = Structure::new(&cfg).unwrap();
            let db = DotBracketVec::try_from(s.structure()).unwrap();
            let (nested, knotted) = decompose(&db, split).unwrap();
            assert_eq!(s.helices(Some(split)), &nested[..]);
            assert_eq!(s.pk_helices(), &knotted[..]);
            assert_eq!(nested.len(), 2);
            assert_eq!(knotted.len(), 1);
        }
    }

    #[test]
    fn test_summary() {
        let cfg = StructureConfig::new("GGGAAACCC").with_structure("(((...)))");
        let summary = Structure::new(&cfg).unwrap().summary();
        assert_eq!(summary.structure, "(((...)))");
        assert_eq!(summary.basepairs.len(), 3);
        assert_eq!(summary.helices.len(), 1);
        assert!(summary.warnings.is_empty());
    }
}
