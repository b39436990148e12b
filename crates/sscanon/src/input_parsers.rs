use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::{anyhow, Result};
use paste::paste;
use ss_sequence::is_nucleic_acid;
use ss_structure::is_valid_grammar;

/// One FASTA-like record: an optional `>` header, a sequence line and an
/// optional structure line. The structure line may carry an energy as a
/// second token, e.g. `(((...))) -1.20` or `(((...))) (-1.20)`.
///
/// Sequence and structure are kept as raw text; all checks beyond the
/// nucleotide and dot-bracket alphabets happen when a `Structure` is built
/// from them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputRecord {
    pub header: Option<String>,
    pub sequence: String,
    pub structure: Option<String>,
    pub energy: Option<f64>,
}

impl InputRecord {
    /// The header without its `>` prefix, up to the first whitespace.
    pub fn name(&self) -> Option<&str> {
        self.header.as_deref()
            .and_then(|h| h.strip_prefix('>'))
            .and_then(|s| s.split_whitespace().next())
    }
}

fn parse_energy(token: &str) -> Result<f64> {
    let t = token.trim_start_matches('(').trim_end_matches(')');
    t.parse::<f64>()
        .map_err(|_| anyhow!("Cannot parse energy from '{}'", token))
}

// ============================================================
//  Generic FASTA-like parser
// ============================================================

/// Read the first record. Blank lines before the sequence are skipped; a
/// blank line after it ends the record.
pub fn read_fasta_like<R: BufRead>(reader: R) -> Result<InputRecord> {
    let mut record = InputRecord::default();
    let mut sequence: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            if sequence.is_some() {
                break;
            }
            continue;
        }

        let mut tokens = line.split_whitespace();
        if line.starts_with('>') {
            if sequence.is_some() {
                break;
            }
            record.header = Some(line.to_string());
        } else if sequence.is_none() {
            let Some(seq) = tokens.next() else { continue };
            if !is_nucleic_acid(seq) {
                return Err(anyhow!("Invalid sequence line: '{}'", seq));
            }
            sequence = Some(seq.to_string());
        } else {
            let Some(structure) = tokens.next() else { break };
            if !is_valid_grammar(structure) {
                return Err(anyhow!("Invalid structure line: '{}'", structure));
            }
            record.structure = Some(structure.to_string());
            record.energy = tokens.next().map(parse_energy).transpose()?;
            break;
        }
    }

    record.sequence = sequence.ok_or_else(|| anyhow!("Missing sequence line"))?;
    Ok(record)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

define_input_variants!(read_fasta_like, Result<InputRecord>);

/// A position ruler for a sequence of length `len + 1`.
pub fn ruler(len: usize) -> String {
    let mut s = String::new();
    let mut c = 0;
    for i in 0..=len {
        if i % 10 == 0 {
            let t = format!("{}", i / 10);
            c = t.len() - 1;
            s.push_str(&t);
            continue;
        } else if c > 0 {
            c -= 1;
            continue;
        }
        s.push(if i % 10 == 5 { ',' } else { '.' });
    }
    s
}
