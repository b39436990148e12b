//! Layered dot-bracket notation.
//!
//! Every bracket layer is balanced on its own, so a string such as
//! `((.{{.)).}}` decodes into two crossing helices. The unresolved marker
//! (`*`) is part of the grammar but never contributes a pair.

use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;
use std::convert::TryFrom;

use crate::NAIDX;
use crate::Pair;
use crate::StructureError;
use crate::BracketLayer;
use crate::LAYER_COUNT;
use crate::UNRESOLVED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotBracket {
    Unpaired,            // '.'
    Unresolved,          // '*'
    Open(BracketLayer),
    Close(BracketLayer),
}

impl TryFrom<char> for DotBracket {
    type Error = StructureError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(DotBracket::Unpaired),
            UNRESOLVED => Ok(DotBracket::Unresolved),
            _ => match BracketLayer::from_char(c) {
                Some((layer, true)) => Ok(DotBracket::Open(layer)),
                Some((layer, false)) => Ok(DotBracket::Close(layer)),
                None => Err(StructureError::InvalidToken(
                        format!("character '{}'", c), "dot-bracket".into(), 0)),
            },
        }
    }
}

impl From<DotBracket> for char {
    fn from(db: DotBracket) -> Self {
        match db {
            DotBracket::Unpaired => '.',
            DotBracket::Unresolved => UNRESOLVED,
            DotBracket::Open(layer) => layer.open(),
            DotBracket::Close(layer) => layer.close(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotBracketVec(pub Vec<DotBracket>);

impl Deref for DotBracketVec {
    type Target = [DotBracket];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DotBracketVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl TryFrom<&str> for DotBracketVec {
    type Error = StructureError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match DotBracket::try_from(c) {
                Ok(db) => vec.push(db),
                Err(StructureError::InvalidToken(tok, src, _)) => {
                    return Err(StructureError::InvalidToken(tok, src, i));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(DotBracketVec(vec))
    }
}

impl DotBracketVec {
    /// The open chain of a given length.
    pub fn unpaired(length: usize) -> Self {
        DotBracketVec(vec![DotBracket::Unpaired; length])
    }

    /// Decode the pairs of every layer. The result always has
    /// `LAYER_COUNT` entries, each sorted by 5'-side index.
    pub fn decode_layers(&self) -> Result<Vec<Vec<Pair>>, StructureError> {
        if self.len() > NAIDX::MAX as usize {
            return Err(StructureError::InvalidToken(
                    format!("length {}", self.len()), "dot-bracket".into(), NAIDX::MAX as usize));
        }
        let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); LAYER_COUNT];
        let mut layers: Vec<Vec<Pair>> = vec![Vec::new(); LAYER_COUNT];

        for (i, db) in self.iter().enumerate() {
            match *db {
                DotBracket::Open(layer) => stacks[layer.index()].push(i),
                DotBracket::Close(layer) => {
                    let o = stacks[layer.index()].pop()
                        .ok_or(StructureError::UnmatchedClose(layer.close(), i))?;
                    layers[layer.index()].push(Pair::new(o as NAIDX, i as NAIDX));
                }
                DotBracket::Unpaired | DotBracket::Unresolved => (),
            }
        }

        for layer in BracketLayer::all() {
            if let Some(i) = stacks[layer.index()].pop() {
                return Err(StructureError::UnmatchedOpen(layer.open(), i));
            }
        }

        for pairs in layers.iter_mut() {
            pairs.sort_unstable();
        }
        Ok(layers)
    }

    /// Decode all pairs, regardless of their layer.
    pub fn decode(&self) -> Result<Vec<Pair>, StructureError> {
        let mut pairs: Vec<Pair> = self.decode_layers()?.into_iter().flatten().collect();
        pairs.sort_unstable();
        Ok(pairs)
    }

    /// Encode pairs using the round bracket layer only.
    pub fn encode(pairs: &[Pair], length: usize) -> Result<Self, StructureError> {
        Self::encode_layers(length, &[pairs.to_vec()], &[])
    }

    /// Encode one pair list per layer (base layer first). Both positions of
    /// every unresolved pair get a single-sided marker, if they are still
    /// unpaired.
    pub fn encode_layers(
        length: usize,
        layers: &[Vec<Pair>],
        unresolved: &[Pair],
    ) -> Result<Self, StructureError> {
        if layers.len() > LAYER_COUNT {
            return Err(StructureError::PaletteExhausted(layers.len()));
        }
        let mut db = Self::unpaired(length);

        for (layer, pairs) in BracketLayer::all().zip(layers) {
            for p in pairs {
                let (i, j) = (p.i() as usize, p.j() as usize);
                if j >= length {
                    return Err(StructureError::InvalidPair(i, j));
                }
                for k in [i, j] {
                    if db[k] != DotBracket::Unpaired {
                        return Err(StructureError::IndexConflict(k));
                    }
                }
                db[i] = DotBracket::Open(layer);
                db[j] = DotBracket::Close(layer);
            }
        }

        for p in unresolved {
            let (i, j) = (p.i() as usize, p.j() as usize);
            if j >= length {
                return Err(StructureError::InvalidPair(i, j));
            }
            for k in [i, j] {
                if db[k] == DotBracket::Unpaired {
                    db[k] = DotBracket::Unresolved;
                }
            }
        }
        Ok(db)
    }

    /// Reset both positions of every pair to unpaired.
    pub fn blank(&mut self, pairs: &[Pair]) {
        for p in pairs {
            for k in [p.i() as usize, p.j() as usize] {
                if let Some(db) = self.get_mut(k) {
                    *db = DotBracket::Unpaired;
                }
            }
        }
    }
}

/// True if every character belongs to the layered dot-bracket alphabet.
pub fn is_valid_grammar(s: &str) -> bool {
    s.chars().all(|c| DotBracket::try_from(c).is_ok())
}

/// True if the string is grammatical and every layer is balanced.
pub fn is_balanced(s: &str) -> bool {
    DotBracketVec::try_from(s)
        .and_then(|db| db.decode_layers())
        .is_ok()
}

impl fmt::Display for DotBracketVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for db in &self.0 {
            write!(f, "{}", char::from(*db))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_bracket_from_char() {
        assert_eq!(DotBracket::try_from('.').unwrap(), DotBracket::Unpaired);
        assert_eq!(DotBracket::try_from('*').unwrap(), DotBracket::Unresolved);
        assert_eq!(DotBracket::try_from('(').unwrap(), DotBracket::Open(BracketLayer::ROUND));
        assert_eq!(DotBracket::try_from('}').unwrap(), DotBracket::Close(BracketLayer::CURLY));
        assert_eq!(DotBracket::try_from('A').unwrap(), DotBracket::Open(BracketLayer::new(3).unwrap()));
    }

    #[test]
    fn test_dot_bracket_from_invalid_char() {
        let res = DotBracketVec::try_from("((.[))");
        assert!(matches!(res, Err(StructureError::InvalidToken(_, src, 3)) if src == "dot-bracket"));
    }

    #[test]
    fn test_grammar_and_balance() {
        assert!(is_valid_grammar("((.*.{Aa}))"));
        assert!(!is_valid_grammar("((.[.]))"));
        assert!(is_balanced("(((...)))"));
        assert!(is_balanced("((.{{.)).}}"));
        assert!(is_balanced("(.*.)"));
        assert!(!is_balanced("((.{.)).}}"));
        assert!(!is_balanced("(.}"));
        assert!(!is_balanced("(x)"));
    }

    #[test]
    fn test_decode_nested() {
        let db = DotBracketVec::try_from("(((...)))").unwrap();
        let pairs = db.decode().unwrap();
        assert_eq!(pairs, vec![Pair::new(0, 8), Pair::new(1, 7), Pair::new(2, 6)]);
    }

    #[test]
    fn test_decode_layers() {
        let db = DotBracketVec::try_from("(.<.).>*Aa").unwrap();
        let layers = db.decode_layers().unwrap();
        assert_eq!(layers.len(), LAYER_COUNT);
        assert_eq!(layers[0], vec![Pair::new(0, 4)]);
        assert!(layers[1].is_empty());
        assert_eq!(layers[2], vec![Pair::new(2, 6)]);
        assert_eq!(layers[3], vec![Pair::new(8, 9)]);
    }

    #[test]
    fn test_decode_unmatched() {
        let db = DotBracketVec::try_from("((.)").unwrap();
        assert_eq!(db.decode().unwrap_err(), StructureError::UnmatchedOpen('(', 0));
        let db = DotBracketVec::try_from("(.)}").unwrap();
        assert_eq!(db.decode().unwrap_err(), StructureError::UnmatchedClose('}', 3));
    }

    #[test]
    fn test_roundtrip() {
        for s in ["(((...)))", "..((..))..((...)).", "", "....", "(.(.).)"] {
            let db = DotBracketVec::try_from(s).unwrap();
            let back = DotBracketVec::encode(&db.decode().unwrap(), s.len()).unwrap();
            assert_eq!(back.to_string(), s);
        }
    }

    #[test]
    fn test_encode_layers() {
        let layers = vec![vec![Pair::new(0, 4)], vec![Pair::new(2, 6)]];
        let db = DotBracketVec::encode_layers(10, &layers, &[Pair::new(7, 9)]).unwrap();
        assert_eq!(db.to_string(), "(.{.).}*.*");
    }

    #[test]
    fn test_encode_conflicts() {
        let err = DotBracketVec::encode(&[Pair::new(0, 4), Pair::new(4, 6)], 8).unwrap_err();
        assert_eq!(err, StructureError::IndexConflict(4));
        let err = DotBracketVec::encode(&[Pair::new(0, 8)], 8).unwrap_err();
        assert_eq!(err, StructureError::InvalidPair(0, 8));
        let too_many = vec![vec![]; LAYER_COUNT + 1];
        let err = DotBracketVec::encode_layers(8, &too_many, &[]).unwrap_err();
        assert_eq!(err, StructureError::PaletteExhausted(LAYER_COUNT + 1));
    }

    #[test]
    fn test_blank() {
        let mut db = DotBracketVec::try_from("((.{.)).}").unwrap();
        db.blank(&[Pair::new(3, 8)]);
        assert_eq!(db.to_string(), "((...))..");
    }
}
