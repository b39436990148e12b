use ss_structure::HelixSplit;

/// Everything needed to build a `Structure`.
///
/// At most one of `structure` and `basepairs` may be set; with neither, the
/// structure is the open chain. Pair indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureConfig {
    pub sequence: String,
    pub structure: Option<String>,
    pub basepairs: Option<Vec<(usize, usize)>>,
    pub energy: f64,
    pub allow_pseudoknots: bool,
    pub allow_non_canonical: bool,
    pub allow_lonely_pairs: bool,
    /// Split mode used for lonely-pair detection and the helix cache.
    pub helix_split: HelixSplit,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            sequence: String::new(),
            structure: None,
            basepairs: None,
            energy: 0.0,
            allow_pseudoknots: false,
            allow_non_canonical: false,
            allow_lonely_pairs: false,
            helix_split: HelixSplit::Stack,
        }
    }
}

impl StructureConfig {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            ..Default::default()
        }
    }

    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    pub fn with_basepairs(mut self, basepairs: Vec<(usize, usize)>) -> Self {
        self.basepairs = Some(basepairs);
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_pseudoknots(mut self, allow: bool) -> Self {
        self.allow_pseudoknots = allow;
        self
    }

    pub fn with_non_canonical(mut self, allow: bool) -> Self {
        self.allow_non_canonical = allow;
        self
    }

    pub fn with_lonely_pairs(mut self, allow: bool) -> Self {
        self.allow_lonely_pairs = allow;
        self
    }

    pub fn with_helix_split(mut self, split: HelixSplit) -> Self {
        self.helix_split = split;
        self
    }
}
