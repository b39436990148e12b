use std::io::Write;
use log::info;
use colored::*;
use serde::Serialize;
use env_logger::Builder;
use clap::Args;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;

use ss_structure::HelixSplit;
use ss_model::Structure;
use ss_model::StructureConfig;
use ss_model::StructureSummary;

use sscanon::input_parsers::ruler;
use sscanon::input_parsers::InputRecord;
use sscanon::input_parsers::read_fasta_like_input;


#[derive(Debug, Args)]
pub struct CanonInput {
    /// Input file (FASTA-like), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Print a JSON summary instead of the annotated structure
    #[arg(long)]
    pub json: bool,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct PolicyArguments {
    /// Draw pseudoknots on additional bracket layers
    #[arg(long)]
    pub pseudoknots: bool,

    /// Keep pairs other than Watson-Crick and G-U wobble
    #[arg(long)]
    pub non_canonical: bool,

    /// Keep helices that consist of a single pair
    #[arg(long)]
    pub lonely_pairs: bool,

    /// Free energy in kcal/mol (overrides the energy of the input record)
    #[arg(long, allow_hyphen_values = true)]
    pub energy: Option<f64>,

    /// Helix grouping: "stack" or "interior"
    #[arg(long, default_value_t = HelixSplit::Stack)]
    pub split: HelixSplit,
}

impl PolicyArguments {
    pub fn build_config(&self, record: &InputRecord) -> StructureConfig {
        let mut config = StructureConfig::new(record.sequence.clone())
            .with_energy(self.energy.or(record.energy).unwrap_or(0.0))
            .with_pseudoknots(self.pseudoknots)
            .with_non_canonical(self.non_canonical)
            .with_lonely_pairs(self.lonely_pairs)
            .with_helix_split(self.split);
        if let Some(s) = &record.structure {
            config = config.with_structure(s.clone());
        }
        config
    }
}


#[derive(Debug, Parser)]
#[command(name = "ss-canon")]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub canon: CanonInput,

    #[command(flatten, next_help_heading = "Structure policy")]
    pub policy: PolicyArguments,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    name: Option<&'a str>,
    #[serde(flatten)]
    summary: StructureSummary,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.canon.verbose);

    let record = read_fasta_like_input(&cli.canon.input)?;
    let structure = Structure::new(&cli.policy.build_config(&record))?;

    if cli.canon.json {
        let out = JsonRecord { name: record.name(), summary: structure.summary() };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(h) = &record.header {
        println!("{}", h.yellow())
    }
    let last = structure.len().saturating_sub(1);
    info!("{}", ruler(last).magenta());
    println!("{}\n{} {}", structure.sequence(), structure.structure(),
        format!("{:>6.2}", structure.energy()).green());
    info!("{}", ruler(last).magenta());

    for h in structure.helices(None) {
        info!("helix {} ({} bp)", h, h.len());
    }
    for h in structure.pk_helices() {
        info!("pseudoknot helix {} {}{} ({} bp)", h, h.layer().open(), h.layer().close(), h.len());
    }
    if !structure.lonely_pairs().is_empty() {
        info!("{} lonely pairs removed.", structure.lonely_pairs().len());
    }
    if !structure.non_canonical_pairs().is_empty() {
        info!("{} non-canonical pairs{}.", structure.non_canonical_pairs().len(),
            if structure.allows_non_canonical() { "" } else { " removed" });
    }
    Ok(())
}
