//! Command-line argument parsing.

use std::path::PathBuf;

/// Verifies an ElectionGuard-style election record.
///
/// Accepts either a single `--record` directory in the standard layout, or
/// individual paths to each input file/directory.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Clargs {
    /// Record root directory, laid out as constants.json, context.json,
    /// description.json, encrypted_ballots/, spoiled_ballots/, tally.json,
    /// coefficients/, devices/.
    #[arg(long, env = "ELECTIONGUARD_VERIFIER_RECORD_DIR")]
    pub record: Option<PathBuf>,

    #[arg(long)]
    pub constants: Option<PathBuf>,

    #[arg(long)]
    pub context: Option<PathBuf>,

    #[arg(long)]
    pub description: Option<PathBuf>,

    #[arg(long)]
    pub ballots: Option<PathBuf>,

    #[arg(long)]
    pub spoiled_ballots: Option<PathBuf>,

    #[arg(long)]
    pub tally: Option<PathBuf>,

    #[arg(long)]
    pub coefficients: Option<PathBuf>,

    /// Device metadata directory; read but not currently checked.
    #[arg(long)]
    pub devices: Option<PathBuf>,

    /// Maximum number of offending locations to print in detail.
    #[arg(long, default_value_t = 50)]
    pub max_failures: usize,

    /// Stop at the first failure instead of accumulating all of them.
    #[arg(long)]
    pub fail_fast: bool,

    /// Emit the machine-readable `{ "ok": ..., "failures": [...] }` summary
    /// to stdout in addition to the human-readable report on stderr.
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (stackable: -v, -vv, -vvv).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging output except the final verdict.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Clargs {
    /// The individual-path overrides, if given, else derived from `--record`.
    pub fn resolve_paths(&self) -> anyhow::Result<verifier_core::ingest::RecordPaths> {
        if let Some(record) = &self.record {
            let mut paths = verifier_core::ingest::RecordPaths::from_record_root(record);
            if let Some(p) = &self.constants {
                paths.constants = p.clone();
            }
            if let Some(p) = &self.context {
                paths.context = p.clone();
            }
            if let Some(p) = &self.description {
                paths.description = p.clone();
            }
            if let Some(p) = &self.ballots {
                paths.ballots_dir = p.clone();
            }
            if let Some(p) = &self.spoiled_ballots {
                paths.spoiled_ballots_dir = p.clone();
            }
            if let Some(p) = &self.tally {
                paths.tally = p.clone();
            }
            if let Some(p) = &self.coefficients {
                paths.coefficients_dir = p.clone();
            }
            return Ok(paths);
        }

        Ok(verifier_core::ingest::RecordPaths {
            constants: self
                .constants
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--constants is required without --record"))?,
            context: self
                .context
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--context is required without --record"))?,
            description: self
                .description
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--description is required without --record"))?,
            ballots_dir: self
                .ballots
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--ballots is required without --record"))?,
            spoiled_ballots_dir: self.spoiled_ballots.clone().unwrap_or_default(),
            tally: self
                .tally
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--tally is required without --record"))?,
            coefficients_dir: self
                .coefficients
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--coefficients is required without --record"))?,
        })
    }
}
